//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire.

pub mod create_link;
pub mod health;
pub mod invalidate;
pub mod resolve;
pub mod stats;
