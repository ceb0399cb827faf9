//! Utility functions shared by the engine and the adapters.
//!
//! - [`token`] - Short token generation
//! - [`secret`] - Secret hashing and verification
//! - [`url_validator`] - Target URL validation
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod secret;
pub mod token;
pub mod url_validator;
