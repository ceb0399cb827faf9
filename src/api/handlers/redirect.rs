//! Handler for short link resolution.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::resolve::ResolveQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a token to its original URL.
///
/// # Endpoint
///
/// `GET /links/{token}?password=<secret>`
///
/// Every successful call counts as one click, whoever the caller is.
///
/// # Errors
///
/// - 404 Not Found if the token does not exist
/// - 403 Forbidden if the link is invalidated, expired, or the secret is
///   missing or wrong; `error.details.reason` tells which
pub async fn redirect_handler(
    Path(token): Path<String>,
    Query(query): Query<ResolveQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state
        .link_service
        .resolve(&token, query.password.as_deref())
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
