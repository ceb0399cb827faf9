//! DTOs for the link creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CreateLink;
use crate::domain::entities::CreatedLink;

/// Request body for `POST /links`.
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "password": "secure123",
///   "expirationDate": "2030-02-28T00:00:00Z"
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// The destination to shorten.
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional secret required to resolve the link. `secret` is accepted as an alias.
    #[serde(default, alias = "secret")]
    pub password: Option<String>,

    /// Optional RFC 3339 timestamp after which the link stops resolving.
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl From<CreateLinkRequest> for CreateLink {
    fn from(request: CreateLinkRequest) -> Self {
        Self {
            original_url: request.original_url,
            secret: request.password,
            expiration_date: request.expiration_date,
        }
    }
}

/// Response body for `POST /links`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    /// Shareable address of the new link.
    pub link: String,
    pub shortened_url: String,
    pub target: String,
    pub valid: bool,
}

impl From<CreatedLink> for CreateLinkResponse {
    fn from(created: CreatedLink) -> Self {
        Self {
            link: created.link,
            shortened_url: created.token,
            target: created.original_url,
            valid: created.is_valid,
        }
    }
}
