//! API route configuration.
//!
//! Routes are split by how they are rate limited in
//! [`crate::routes::app_router`]: resolution and statistics are read paths,
//! creation and invalidation change stored links.

use crate::api::handlers::{
    create_link_handler, invalidate_handler, redirect_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Read-only link routes.
///
/// # Endpoints
///
/// - `GET /links/{token}`        - Resolve and redirect (counts a click)
/// - `GET /links/{token}/stats`  - Usage statistics
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/links/{token}", get(redirect_handler))
        .route("/links/{token}/stats", get(stats_handler))
}

/// Routes that create or change links.
///
/// # Endpoints
///
/// - `POST /links`                    - Create a shortened link
/// - `PUT  /links/{token}/invalidate` - Permanently disable a link
pub fn management_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler))
        .route("/links/{token}/invalidate", put(invalidate_handler))
}
