//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                   - Health check: link store reachability
//! - `POST /links`                    - Create a shortened link
//! - `GET  /links/{token}`            - Resolve and redirect
//! - `GET  /links/{token}/stats`      - Link statistics
//! - `PUT  /links/{token}/invalidate` - Invalidate a link
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateTier};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let public = rate_limit::apply(api::routes::public_routes(), RateTier::Public, behind_proxy);
    let management = rate_limit::apply(
        api::routes::management_routes(),
        RateTier::Sensitive,
        behind_proxy,
    );

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(public)
        .merge(management)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
