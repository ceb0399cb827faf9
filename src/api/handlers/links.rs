//! Handler for link creation.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::create_link::{CreateLinkRequest, CreateLinkResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened link.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "password": "secure123",              // optional
///   "expirationDate": "2030-01-01T00:00:00Z" // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "link": "http://localhost:3000/links/3f9a0c12be",
///   "shortenedUrl": "3f9a0c12be",
///   "target": "https://example.com",
///   "valid": true
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not valid JSON, `originalUrl` is
/// missing or not an absolute URL, or `expirationDate` is not RFC 3339.
pub async fn create_link_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    payload.validate()?;

    let created = state.link_service.create_link(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
