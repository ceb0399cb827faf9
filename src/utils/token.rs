//! Short token generation.
//!
//! Tokens are the public keys of links. They are drawn from the operating
//! system CSPRNG and rendered as lowercase hex so they are URL-safe without
//! any escaping.

use crate::error::AppError;
use serde_json::json;

/// Number of random bytes behind each token (40 bits of entropy).
const TOKEN_LENGTH_BYTES: usize = 5;

/// Length of a generated token in characters.
pub const TOKEN_LENGTH: usize = TOKEN_LENGTH_BYTES * 2;

/// Generates a fresh random short token.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let token = generate_token()?;
/// assert_eq!(token.len(), 10);
/// assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn generate_token() -> Result<String, AppError> {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate token",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(hex::encode(buffer))
}
