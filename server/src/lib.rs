//! HTTP front end for the todo service.
//!
//! # Overview
//! Serves the JSON CRUD API under `/api/todos` and the static browser client
//! from `public/`.
//!
//! # Design
//! - One `TodoService` per router, shared behind a `tokio` `RwLock`, so
//!   each test can build an isolated app.
//! - The per-IP rate limit only wraps the API routes; static files are
//!   served without counting against it.
//! - Panics are caught at the outermost layer and reported as a generic 500.

pub mod config;
pub mod error;
pub mod logging;
pub mod rate_limit;
pub mod routes;
pub mod security;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use todo_core::{TodoService, TodoStore, TtlCache};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{
    catch_panic::CatchPanicLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use rate_limit::{IpRateLimiter, RateLimitConfig};
pub use todo_core::Todo;

/// The app as it boots: the seeded todo list behind the configured cache.
pub fn app(config: &ServerConfig) -> Router {
    let service = TodoService::new(TodoStore::seeded(), TtlCache::with_ttl(config.cache_ttl));
    router(service, config)
}

/// Build the full router around an existing service.
pub fn router(service: TodoService, config: &ServerConfig) -> Router {
    let limiter = IpRateLimiter::new(config.rate_limit);
    let api = routes::api_routes()
        .route_layer(middleware::from_fn_with_state(limiter, rate_limit::limit_by_ip))
        .with_state(Arc::new(RwLock::new(service)));

    let app = api
        .route_service("/", ServeFile::new(config.static_dir.join("index.html")))
        .fallback_service(ServeDir::new(&config.static_dir));
    with_middleware(app)
}

/// Wrap `router` in the layers every response passes through: panic
/// recovery, an INFO-level access log and security headers.
pub fn with_middleware(router: Router) -> Router {
    let router = router
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );
    security::with_security_headers(router)
}

pub async fn run(listener: TcpListener, config: &ServerConfig) -> Result<(), std::io::Error> {
    let app = app(config);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await
}
