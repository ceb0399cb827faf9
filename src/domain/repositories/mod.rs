//! Repository trait definitions for the domain layer.
//!
//! - [`LinkRepository`] - Link storage contract
//!
//! Implementations live in `crate::infrastructure::persistence`; a
//! `mockall` mock is generated for unit tests.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
