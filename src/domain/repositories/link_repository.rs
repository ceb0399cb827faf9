//! Repository trait for link storage.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract consumed by the link lifecycle engine.
///
/// Implementations must reject duplicate tokens and apply each update to a
/// single record atomically.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process memory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its public token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, AppError>;

    /// Stores a new link with `clicks = 0`, `is_valid = true` and `revision = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Persists the mutable state (`clicks`, `is_valid`) of `link`.
    ///
    /// The write only happens if the stored revision still equals
    /// `link.revision`; the stored revision is then incremented. Invalidity is
    /// sticky: a stored `is_valid = false` is never reset to `true`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with the stored state after the write
    /// - `Ok(None)` if the record changed since `link` was read, or is gone
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, link: &Link) -> Result<Option<Link>, AppError>;

    /// Returns true if the backing store is reachable.
    async fn health_check(&self) -> bool;
}
