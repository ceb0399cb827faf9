//! Secret hashing and verification.
//!
//! Link secrets are stored as salted Argon2id PHC strings. The cleartext
//! secret never leaves the request that carried it.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde_json::json;

use crate::error::AppError;

/// Default Argon2 time cost (number of passes over memory).
pub const DEFAULT_HASH_COST: u32 = 2;

/// Hashes a secret with a fresh random salt.
///
/// `cost` is the Argon2 time cost; memory and parallelism use the library
/// defaults. Hashing the same secret twice yields two different strings.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if `cost` is rejected by Argon2 or hashing fails.
pub fn hash_secret(secret: &str, cost: u32) -> Result<String, AppError> {
    let params = Params::new(
        Params::DEFAULT_M_COST,
        cost,
        Params::DEFAULT_P_COST,
        None,
    )
    .map_err(|e| AppError::internal("Invalid hash parameters", json!({ "reason": e.to_string() })))?;

    let salt = SaltString::generate(&mut OsRng);

    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal("Failed to hash secret", json!({ "reason": e.to_string() })))
}

/// Checks a secret against a stored hash.
///
/// Parameters are read from the PHC string itself, so hashes produced with
/// any cost verify correctly. A malformed stored hash never matches.
pub fn verify_secret(secret: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        tracing::warn!("Stored secret hash is malformed");
        return false;
    };

    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_secret("secure123", 1).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_secret("secure123", &hash));
        assert!(!verify_secret("wrong", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_secret("secure123", 1).unwrap();
        let second = hash_secret("secure123", 1).unwrap();

        assert_ne!(first, second);
        assert!(verify_secret("secure123", &first));
        assert!(verify_secret("secure123", &second));
    }

    #[test]
    fn test_hash_never_contains_cleartext() {
        let hash = hash_secret("plain-secret-value", 1).unwrap();
        assert!(!hash.contains("plain-secret-value"));
    }

    #[test]
    fn test_cost_is_recorded_in_hash() {
        let hash = hash_secret("secure123", 3).unwrap();
        assert!(hash.contains("t=3"));
        assert!(verify_secret("secure123", &hash));
    }

    #[test]
    fn test_zero_cost_is_rejected() {
        let result = hash_secret("secure123", 0);
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[test]
    fn test_verify_malformed_hash_returns_false() {
        assert!(!verify_secret("secure123", "not-a-phc-string"));
        assert!(!verify_secret("secure123", ""));
    }
}
