//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP
//! handlers and the admin CLI call into.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, resolution, statistics and invalidation

pub mod services;
