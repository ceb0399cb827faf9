//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns usage statistics of a link.
///
/// # Endpoint
///
/// `GET /links/{token}/stats`
///
/// Available for expired and invalidated links as well.
///
/// # Response
///
/// ```json
/// {
///   "shortenedUrl": "3f9a0c12be",
///   "originalUrl": "https://example.com",
///   "clicks": 42,
///   "isValid": true,
///   "createdAt": "2025-01-15T10:30:00Z",
///   "expirationDate": null
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the token does not exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.link_service.get_stats(&token).await?;

    Ok(Json(stats.into()))
}
