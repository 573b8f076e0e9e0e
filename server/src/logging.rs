//! Process-wide `tracing` subscriber.
//!
//! JSON events go to stdout and to `combined.log`; `error.log` only receives
//! errors. The stdout and combined filters default to `info` and honour
//! `RUST_LOG`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter, Layer};

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    OpenFile(#[from] InitError),

    #[error("failed to install subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Keeps the background log writers alive; drop it only at shutdown.
pub struct LogGuards {
    _guards: [WorkerGuard; 2],
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn file_appender(dir: &Path, name: &str) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
}

pub fn init(log_dir: &Path) -> Result<LogGuards, LoggingError> {
    let (combined, combined_guard) = tracing_appender::non_blocking(file_appender(log_dir, "combined.log")?);
    let (errors, errors_guard) = tracing_appender::non_blocking(file_appender(log_dir, "error.log")?);

    tracing_subscriber::registry()
        .with(fmt::layer().json().with_filter(env_filter()))
        .with(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(combined)
                .with_filter(env_filter()),
        )
        .with(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(errors)
                .with_filter(LevelFilter::ERROR),
        )
        .try_init()?;

    Ok(LogGuards {
        _guards: [combined_guard, errors_guard],
    })
}
