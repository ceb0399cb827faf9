//! In-memory implementation of link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link storage kept in process memory.
///
/// Records are keyed by token in a [`DashMap`], whose per-shard locks make
/// each insert and update atomic. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
}

impl InMemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(token).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.short_token.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Token already exists",
                json!({ "token": new_link.short_token }),
            )),
            Entry::Vacant(slot) => {
                let link = Link::from_new(new_link);
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn update(&self, link: &Link) -> Result<Option<Link>, AppError> {
        let Some(mut stored) = self.links.get_mut(&link.short_token) else {
            return Ok(None);
        };

        if stored.revision != link.revision {
            return Ok(None);
        }

        stored.clicks = link.clicks;
        stored.is_valid = stored.is_valid && link.is_valid;
        stored.revision += 1;

        Ok(Some(stored.clone()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
