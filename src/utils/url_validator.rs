//! Target URL validation.
//!
//! Links only point at absolute URLs with a host and a web or FTP scheme.
//! The accepted URL is stored exactly as submitted, so input that the
//! parser would silently clean up (surrounding spaces, embedded tabs or
//! newlines) is rejected instead.

use url::Url;

/// Schemes a link may point to.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Reasons a target URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain whitespace or control characters")]
    IllegalCharacter,
}

/// Checks that `input` is an absolute URL suitable as a link target.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for unparsable or relative input,
/// [`UrlValidationError::UnsupportedScheme`] for schemes such as `javascript:` or
/// `file:`, [`UrlValidationError::MissingHost`] when no host is present, and
/// [`UrlValidationError::IllegalCharacter`] for any whitespace or control
/// character, which could not be sent back in a `Location` header.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_target_url("https://example.com/path?q=1").is_ok());
/// assert!(validate_target_url("/relative/path").is_err());
/// assert!(validate_target_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(UrlValidationError::IllegalCharacter);
    }

    let url = Url::parse(input)
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(UrlValidationError::UnsupportedScheme(
            url.scheme().to_string(),
        ));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}
