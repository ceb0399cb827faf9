//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, LinkServiceConfig};
use crate::domain::repositories::LinkRepository;

/// Link service over whichever store the process was started with.
pub type SharedLinkService = Arc<LinkService<dyn LinkRepository>>;

/// State cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: SharedLinkService,
}

impl AppState {
    /// Wires the link service on top of `repository`.
    pub fn new(repository: Arc<dyn LinkRepository>, config: LinkServiceConfig) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository, config)),
        }
    }
}
