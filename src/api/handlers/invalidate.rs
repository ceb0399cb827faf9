//! Handler for link invalidation.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::invalidate::InvalidateResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Permanently disables a link.
///
/// # Endpoint
///
/// `PUT /links/{token}/invalidate`
///
/// Repeating the call on an invalid link returns the same confirmation.
///
/// # Errors
///
/// Returns 404 Not Found if the token does not exist.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<InvalidateResponse>, AppError> {
    let link = state.link_service.invalidate(&token).await?;

    Ok(Json(InvalidateResponse::new(link.short_token)))
}
