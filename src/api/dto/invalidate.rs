//! DTO for the invalidation endpoint.

use serde::Serialize;

/// Confirmation returned by `PUT /links/{token}/invalidate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidateResponse {
    pub message: String,
    pub shortened_url: String,
}

impl InvalidateResponse {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            message: "The link has been successfully invalidated.".to_string(),
            shortened_url: token.into(),
        }
    }
}
