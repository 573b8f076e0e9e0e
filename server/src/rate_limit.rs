//! Per-client request limiting for the API routes.
//!
//! # Design
//! Each client IP gets a fixed window that opens with its first request and
//! admits at most `max_requests` until `window` has elapsed, after which the
//! count starts over. No window ever admits more than the quota. Requests
//! that carry no peer address (in-process tests) share the
//! unspecified-address window.
//!
//! Time comes from `tokio::time`, so tests can pause and advance the clock.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    RequestExt,
};
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Body of the rejection sent to clients over their quota.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

const DEFAULT_MAX_REQUESTS: NonZeroU32 = match NonZeroU32::new(100) {
    Some(n) => n,
    None => panic!("default quota must be non-zero"),
};

const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: NonZeroU32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    /// 100 requests per 15 minutes.
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    hits: u32,
}

#[derive(Debug, Default)]
struct Windows {
    clients: HashMap<IpAddr, Window>,
    last_sweep: Option<Instant>,
}

#[derive(Clone)]
pub struct IpRateLimiter {
    config: RateLimitConfig,
    windows: Arc<Mutex<Windows>>,
}

impl IpRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(Mutex::new(Windows::default())),
        }
    }

    /// Record one request from `ip`; false once the client is over quota
    /// for its current window.
    pub async fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let window = self.config.window;
        let mut windows = self.windows.lock().await;

        // Drop expired windows at most once per window length.
        let sweep_due = windows
            .last_sweep
            .map_or(true, |at| now.duration_since(at) >= window);
        if sweep_due {
            windows
                .clients
                .retain(|_, w| now.duration_since(w.started) < window);
            windows.last_sweep = Some(now);
        }

        let entry = windows.clients.entry(ip).or_insert(Window {
            started: now,
            hits: 0,
        });
        if now.duration_since(entry.started) >= window {
            *entry = Window {
                started: now,
                hits: 0,
            };
        }
        if entry.hits >= self.config.max_requests.get() {
            return false;
        }
        entry.hits += 1;
        true
    }
}

/// `axum` middleware rejecting over-quota clients with 429.
pub async fn limit_by_ip(
    State(limiter): State<IpRateLimiter>,
    mut req: Request,
    next: Next,
) -> Response {
    let ip = req
        .extract_parts::<ConnectInfo<SocketAddr>>()
        .await
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if !limiter.check(ip).await {
        tracing::warn!(%ip, "rate limit exceeded");
        return (StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE).into_response();
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    fn config(max: u32, window: Duration) -> RateLimitConfig {
        RateLimitConfig {
            max_requests: NonZeroU32::new(max).unwrap(),
            window,
        }
    }

    #[test]
    fn default_is_100_per_15_minutes() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests.get(), 100);
        assert_eq!(config.window, Duration::from_secs(900));
    }

    #[tokio::test(start_paused = true)]
    async fn allows_quota_then_rejects() {
        let limiter = IpRateLimiter::new(config(3, Duration::from_secs(60)));
        assert!(limiter.check(LOCALHOST).await);
        assert!(limiter.check(LOCALHOST).await);
        assert!(limiter.check(LOCALHOST).await);
        assert!(!limiter.check(LOCALHOST).await);
    }

    #[tokio::test(start_paused = true)]
    async fn steady_traffic_never_exceeds_quota_per_window() {
        let window = Duration::from_secs(1);
        let limiter = IpRateLimiter::new(config(10, window));

        // one request every 5 ms for just under a window
        let mut admitted = 0;
        for _ in 0..190 {
            if limiter.check(LOCALHOST).await {
                admitted += 1;
            }
            tokio::time::advance(Duration::from_millis(5)).await;
        }
        assert_eq!(admitted, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn quota_resets_when_the_window_ends() {
        let window = Duration::from_secs(900);
        let limiter = IpRateLimiter::new(config(2, window));
        assert!(limiter.check(LOCALHOST).await);
        assert!(limiter.check(LOCALHOST).await);

        tokio::time::advance(window - Duration::from_secs(1)).await;
        assert!(!limiter.check(LOCALHOST).await);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(limiter.check(LOCALHOST).await);
        assert!(limiter.check(LOCALHOST).await);
        assert!(!limiter.check(LOCALHOST).await);
    }

    #[tokio::test(start_paused = true)]
    async fn clients_are_limited_independently() {
        let limiter = IpRateLimiter::new(config(1, Duration::from_secs(60)));
        let a = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let b = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));
        assert!(limiter.check(a).await);
        assert!(!limiter.check(a).await);
        assert!(limiter.check(b).await);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_windows_are_swept() {
        let window = Duration::from_secs(60);
        let limiter = IpRateLimiter::new(config(5, window));
        for last in 1..=20u8 {
            limiter.check(IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))).await;
        }
        tokio::time::advance(window).await;
        limiter.check(LOCALHOST).await;
        assert_eq!(limiter.windows.lock().await.clients.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn default_quota_admits_exactly_100() {
        let limiter = IpRateLimiter::new(RateLimitConfig::default());
        for _ in 0..100 {
            assert!(limiter.check(LOCALHOST).await);
        }
        assert!(!limiter.check(LOCALHOST).await);
    }
}
