//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the service returns [`AppError`]. Handlers
//! propagate it with `?` and axum turns it into a JSON error envelope:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "forbidden",
//!     "message": "This link has expired.",
//!     "details": { "reason": "expired" }
//!   }
//! }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::access::AccessDenied;
use crate::utils::db_error::{SHORT_TOKEN_CONSTRAINT, is_unique_violation_on_token};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload shared by HTTP responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Service-wide error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input, e.g. a target that is not an absolute URL.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// No link is stored under the requested token.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The link exists but may not be resolved right now.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// A write lost against a concurrent writer or hit a uniqueness constraint.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns the access-denial reason if this is a [`AppError::Forbidden`].
    pub fn access_denied(&self) -> Option<AccessDenied> {
        match self {
            Self::Forbidden(denied) => Some(*denied),
            _ => None,
        }
    }

    /// HTTP status class for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            Self::Validation { details, .. } => ("validation_error", details.clone()),
            Self::NotFound { details, .. } => ("not_found", details.clone()),
            Self::Forbidden(denied) => ("forbidden", json!({ "reason": denied.reason() })),
            Self::Conflict { details, .. } => ("conflict", details.clone()),
            Self::Internal { details, .. } => ("internal_error", details.clone()),
        };

        ErrorInfo {
            code,
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_token(&e) {
            return AppError::conflict(
                "Token already exists",
                json!({ "constraint": SHORT_TOKEN_CONSTRAINT }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("bad", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Forbidden(AccessDenied::Expired).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::conflict("taken", json!({})).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::internal("boom", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_forbidden_error_info_carries_reason() {
        let err = AppError::from(AccessDenied::IncorrectSecret);
        let info = err.to_error_info();

        assert_eq!(info.code, "forbidden");
        assert_eq!(info.message, "Incorrect secret.");
        assert_eq!(info.details["reason"], "incorrect_secret");
    }

    #[test]
    fn test_access_denied_accessor() {
        let err = AppError::Forbidden(AccessDenied::Invalidated);
        assert_eq!(err.access_denied(), Some(AccessDenied::Invalidated));

        let err = AppError::not_found("missing", json!({}));
        assert_eq!(err.access_denied(), None);
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::not_found("The link does not exist.", json!({ "token": "abc" }));
        assert_eq!(err.to_string(), "The link does not exist.");
    }
}
