//! Access checks applied before a link is resolved.
//!
//! Resolution runs a fixed sequence of independent checks over an immutable
//! snapshot of the stored link. The first failing check decides the outcome,
//! so the order of [`ACCESS_CHECKS`] is the precedence callers observe when
//! several conditions fail at once:
//!
//! 1. [`ensure_not_invalidated`]
//! 2. [`ensure_not_expired`]
//! 3. [`ensure_secret_supplied`]
//! 4. [`ensure_secret_matches`]
//!
//! Existence is checked before the pipeline runs, when the link is fetched.

use chrono::{DateTime, Utc};

use crate::domain::entities::Link;
use crate::utils::secret::verify_secret;

/// Why a stored link refused to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("This link has been invalidated.")]
    Invalidated,

    #[error("This link has expired.")]
    Expired,

    #[error("This link is protected. Please provide the secret.")]
    SecretRequired,

    #[error("Incorrect secret.")]
    IncorrectSecret,
}

impl AccessDenied {
    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Invalidated => "invalidated",
            Self::Expired => "expired",
            Self::SecretRequired => "secret_required",
            Self::IncorrectSecret => "incorrect_secret",
        }
    }
}

/// Caller-supplied context for one resolution attempt.
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    pub secret: Option<&'a str>,
    pub now: DateTime<Utc>,
}

impl<'a> AccessRequest<'a> {
    /// Builds a request evaluated at the current time.
    ///
    /// An empty secret counts as no secret.
    pub fn new(secret: Option<&'a str>) -> Self {
        Self::at(secret, Utc::now())
    }

    /// Builds a request evaluated at `now`.
    pub fn at(secret: Option<&'a str>, now: DateTime<Utc>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
            now,
        }
    }
}

/// A single check in the access pipeline.
pub type AccessCheck = fn(&Link, &AccessRequest<'_>) -> Result<(), AccessDenied>;

/// The access pipeline, in precedence order.
pub const ACCESS_CHECKS: [AccessCheck; 4] = [
    ensure_not_invalidated,
    ensure_not_expired,
    ensure_secret_supplied,
    ensure_secret_matches,
];

/// Runs every check in order and stops at the first denial.
pub fn authorize(link: &Link, request: &AccessRequest<'_>) -> Result<(), AccessDenied> {
    ACCESS_CHECKS
        .iter()
        .try_for_each(|check| check(link, request))
}

pub fn ensure_not_invalidated(link: &Link, _: &AccessRequest<'_>) -> Result<(), AccessDenied> {
    if link.is_valid {
        Ok(())
    } else {
        Err(AccessDenied::Invalidated)
    }
}

pub fn ensure_not_expired(link: &Link, request: &AccessRequest<'_>) -> Result<(), AccessDenied> {
    if link.is_expired_at(request.now) {
        Err(AccessDenied::Expired)
    } else {
        Ok(())
    }
}

pub fn ensure_secret_supplied(
    link: &Link,
    request: &AccessRequest<'_>,
) -> Result<(), AccessDenied> {
    if link.is_protected() && request.secret.is_none() {
        Err(AccessDenied::SecretRequired)
    } else {
        Ok(())
    }
}

/// Verifies the supplied secret against the stored hash.
///
/// Runs Argon2 verification, so callers on an async runtime should invoke
/// the pipeline from a blocking context.
pub fn ensure_secret_matches(
    link: &Link,
    request: &AccessRequest<'_>,
) -> Result<(), AccessDenied> {
    match (&link.secret_hash, request.secret) {
        (Some(hash), Some(secret)) if !verify_secret(secret, hash) => {
            Err(AccessDenied::IncorrectSecret)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewLink;
    use crate::utils::secret::hash_secret;
    use chrono::Duration;
    use uuid::Uuid;

    fn link(secret: Option<&str>, expiration_date: Option<DateTime<Utc>>) -> Link {
        Link::from_new(NewLink {
            id: Uuid::new_v4(),
            original_url: "https://example.com".to_string(),
            short_token: "0123456789".to_string(),
            secret_hash: secret.map(|s| hash_secret(s, 1).unwrap()),
            expiration_date,
            created_at: Utc::now(),
        })
    }

    #[test]
    fn test_open_link_passes() {
        let link = link(None, None);
        assert_eq!(authorize(&link, &AccessRequest::new(None)), Ok(()));
    }

    #[test]
    fn test_open_link_ignores_supplied_secret() {
        let link = link(None, None);
        assert_eq!(authorize(&link, &AccessRequest::new(Some("anything"))), Ok(()));
    }

    #[test]
    fn test_invalidated_link_denied() {
        let link = link(None, None).invalidated();
        assert_eq!(
            authorize(&link, &AccessRequest::new(None)),
            Err(AccessDenied::Invalidated)
        );
    }

    #[test]
    fn test_expired_link_denied() {
        let link = link(None, Some(Utc::now() - Duration::hours(1)));
        assert_eq!(
            authorize(&link, &AccessRequest::new(None)),
            Err(AccessDenied::Expired)
        );
    }

    #[test]
    fn test_future_expiration_passes() {
        let link = link(None, Some(Utc::now() + Duration::hours(1)));
        assert_eq!(authorize(&link, &AccessRequest::new(None)), Ok(()));
    }

    #[test]
    fn test_expiration_boundary_is_exclusive() {
        let now = Utc::now();
        let link = link(None, Some(now));

        assert_eq!(authorize(&link, &AccessRequest::at(None, now)), Ok(()));
        assert_eq!(
            authorize(&link, &AccessRequest::at(None, now + Duration::milliseconds(1))),
            Err(AccessDenied::Expired)
        );
    }

    #[test]
    fn test_secret_required() {
        let link = link(Some("secure123"), None);
        assert_eq!(
            authorize(&link, &AccessRequest::new(None)),
            Err(AccessDenied::SecretRequired)
        );
    }

    #[test]
    fn test_empty_secret_counts_as_missing() {
        let link = link(Some("secure123"), None);
        assert_eq!(
            authorize(&link, &AccessRequest::new(Some(""))),
            Err(AccessDenied::SecretRequired)
        );
    }

    #[test]
    fn test_incorrect_secret() {
        let link = link(Some("secure123"), None);
        assert_eq!(
            authorize(&link, &AccessRequest::new(Some("wrong"))),
            Err(AccessDenied::IncorrectSecret)
        );
    }

    #[test]
    fn test_correct_secret_passes() {
        let link = link(Some("secure123"), None);
        assert_eq!(
            authorize(&link, &AccessRequest::new(Some("secure123"))),
            Ok(())
        );
    }

    #[test]
    fn test_invalidated_takes_precedence_over_expired() {
        let link = link(Some("secure123"), Some(Utc::now() - Duration::hours(1))).invalidated();
        assert_eq!(
            authorize(&link, &AccessRequest::new(Some("wrong"))),
            Err(AccessDenied::Invalidated)
        );
    }

    #[test]
    fn test_expired_takes_precedence_over_secret() {
        let link = link(Some("secure123"), Some(Utc::now() - Duration::hours(1)));

        assert_eq!(
            authorize(&link, &AccessRequest::new(None)),
            Err(AccessDenied::Expired)
        );
        assert_eq!(
            authorize(&link, &AccessRequest::new(Some("secure123"))),
            Err(AccessDenied::Expired)
        );
    }

    #[test]
    fn test_secret_match_check_alone_accepts_missing_secret() {
        // Presence is a separate check earlier in the pipeline.
        let link = link(Some("secure123"), None);
        assert_eq!(
            ensure_secret_matches(&link, &AccessRequest::new(None)),
            Ok(())
        );
    }

    #[test]
    fn test_reason_codes_are_distinct() {
        let reasons = [
            AccessDenied::Invalidated.reason(),
            AccessDenied::Expired.reason(),
            AccessDenied::SecretRequired.reason(),
            AccessDenied::IncorrectSecret.reason(),
        ];
        let unique: std::collections::HashSet<_> = reasons.iter().collect();
        assert_eq!(unique.len(), reasons.len());
    }
}
