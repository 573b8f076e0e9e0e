//! Server configuration.
//!
//! Only the listen port comes from the environment (`PORT`, default 3000).
//! Everything else is a plain field with a compiled default so tests can
//! build routers with short TTLs or tight rate limits.

use std::net::SocketAddr;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use crate::rate_limit::RateLimitConfig;

/// Port used when `PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 3000;

/// Errors that can occur when loading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on, on all interfaces.
    pub port: u16,
    /// Directory holding the static client.
    pub static_dir: PathBuf,
    /// Directory receiving `combined.log` and `error.log`.
    pub log_dir: PathBuf,
    /// Lifetime of the cached todo list.
    pub cache_ttl: Duration,
    /// Per-client request quota for the API routes.
    pub rate_limit: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/public")),
            log_dir: PathBuf::from("."),
            cache_ttl: todo_core::cache::DEFAULT_TTL,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::with_port_var(std::env::var("PORT").ok())
    }

    fn with_port_var(value: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            config.port = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
