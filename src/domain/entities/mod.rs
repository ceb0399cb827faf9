//! Core domain entities.
//!
//! - [`Link`] - A stored short link with its lifecycle state
//! - [`NewLink`] - Input for inserting a link
//! - [`LinkStats`] - Read-only projection returned by the stats operation
//! - [`CreatedLink`] - Summary returned after creating a link

pub mod link;

pub use link::{CreatedLink, Link, LinkStats, NewLink};
