//! HTTP request handlers for API endpoints.

pub mod health;
pub mod invalidate;
pub mod links;
pub mod redirect;
pub mod stats;

pub use health::health_handler;
pub use invalidate::invalidate_handler;
pub use links::create_link_handler;
pub use redirect::redirect_handler;
pub use stats::stats_handler;
