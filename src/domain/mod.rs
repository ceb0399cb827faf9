//! Domain layer: entities, access rules and the store contract.
//!
//! - [`entities`] - The [`entities::Link`] record and its projections
//! - [`access`] - Ordered access checks gating resolution
//! - [`repositories`] - Storage trait implemented by the infrastructure layer
//!
//! The domain layer has no knowledge of HTTP or of a concrete database.

pub mod access;
pub mod entities;
pub mod repositories;
