//! Link entity and its projections.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A shortened URL with access-control state.
///
/// `clicks` and `is_valid` are the only fields that change after creation.
/// `revision` is bumped by the store on every update and guards concurrent
/// read-modify-write cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: Uuid,
    pub original_url: String,
    pub short_token: String,
    pub secret_hash: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub clicks: i64,
    pub is_valid: bool,
    pub created_at: DateTime<Utc>,
    pub revision: i64,
}

impl Link {
    /// Builds the stored form of a freshly inserted link.
    pub fn from_new(new_link: NewLink) -> Self {
        Self {
            id: new_link.id,
            original_url: new_link.original_url,
            short_token: new_link.short_token,
            secret_hash: new_link.secret_hash,
            expiration_date: new_link.expiration_date,
            clicks: 0,
            is_valid: true,
            created_at: new_link.created_at,
            revision: 0,
        }
    }

    /// Returns true if resolution requires a secret.
    pub fn is_protected(&self) -> bool {
        self.secret_hash.is_some()
    }

    /// Returns true if the link's expiration date lies strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|expires| now > expires)
    }

    /// Copy of this link with one more recorded click.
    pub fn with_click(&self) -> Self {
        Self {
            clicks: self.clicks + 1,
            ..self.clone()
        }
    }

    /// Copy of this link marked as invalid.
    pub fn invalidated(&self) -> Self {
        Self {
            is_valid: false,
            ..self.clone()
        }
    }

    /// Statistics projection of the current state.
    pub fn stats(&self) -> LinkStats {
        LinkStats {
            token: self.short_token.clone(),
            original_url: self.original_url.clone(),
            clicks: self.clicks,
            is_valid: self.is_valid,
            created_at: self.created_at,
            expiration_date: self.expiration_date,
        }
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: Uuid,
    pub original_url: String,
    pub short_token: String,
    pub secret_hash: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Usage statistics for a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub token: String,
    pub original_url: String,
    pub clicks: i64,
    pub is_valid: bool,
    pub created_at: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Summary of a newly created link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    /// Publicly shareable address embedding the token.
    pub link: String,
    pub token: String,
    pub original_url: String,
    pub is_valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_link(expiration_date: Option<DateTime<Utc>>) -> NewLink {
        NewLink {
            id: Uuid::new_v4(),
            original_url: "https://example.com".to_string(),
            short_token: "a1b2c3d4e5".to_string(),
            secret_hash: None,
            expiration_date,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_new_sets_defaults() {
        let input = new_link(None);
        let link = Link::from_new(input.clone());

        assert_eq!(link.id, input.id);
        assert_eq!(link.short_token, "a1b2c3d4e5");
        assert_eq!(link.clicks, 0);
        assert!(link.is_valid);
        assert_eq!(link.revision, 0);
        assert!(!link.is_protected());
    }

    #[test]
    fn test_is_expired_at() {
        let now = Utc::now();
        let link = Link::from_new(new_link(Some(now)));

        assert!(!link.is_expired_at(now));
        assert!(link.is_expired_at(now + Duration::seconds(1)));
        assert!(!link.is_expired_at(now - Duration::seconds(1)));
    }

    #[test]
    fn test_link_without_expiration_never_expires() {
        let link = Link::from_new(new_link(None));
        assert!(!link.is_expired_at(Utc::now() + Duration::days(3650)));
    }

    #[test]
    fn test_with_click_only_touches_counter() {
        let link = Link::from_new(new_link(None));
        let clicked = link.with_click();

        assert_eq!(clicked.clicks, 1);
        assert_eq!(clicked.revision, link.revision);
        assert_eq!(clicked.original_url, link.original_url);
        assert_eq!(link.clicks, 0);
    }

    #[test]
    fn test_invalidated() {
        let link = Link::from_new(new_link(None));
        let invalid = link.invalidated();

        assert!(!invalid.is_valid);
        assert_eq!(invalid.clicks, link.clicks);
    }

    #[test]
    fn test_stats_projection() {
        let expires = Utc::now() + Duration::hours(1);
        let link = Link::from_new(new_link(Some(expires))).with_click();
        let stats = link.stats();

        assert_eq!(stats.token, link.short_token);
        assert_eq!(stats.original_url, link.original_url);
        assert_eq!(stats.clicks, 1);
        assert!(stats.is_valid);
        assert_eq!(stats.created_at, link.created_at);
        assert_eq!(stats.expiration_date, Some(expires));
    }
}
