//! Link lifecycle service: creation, resolution, statistics and invalidation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::access::{AccessDenied, AccessRequest, authorize};
use crate::domain::entities::{CreatedLink, Link, LinkStats, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::secret::{DEFAULT_HASH_COST, hash_secret};
use crate::utils::token::generate_token;
use crate::utils::url_validator::validate_target_url;

/// Attempts at finding an unused token before giving up.
const MAX_TOKEN_ATTEMPTS: usize = 10;

/// Attempts at a read-modify-write cycle before reporting a conflict.
const MAX_UPDATE_ATTEMPTS: usize = 5;

/// Settings injected into [`LinkService`] at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkServiceConfig {
    /// Prefix of shareable addresses, e.g. `https://s.example.com`.
    pub base_url: String,
    /// Argon2 time cost used when hashing link secrets.
    pub hash_cost: u32,
}

impl Default for LinkServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            hash_cost: DEFAULT_HASH_COST,
        }
    }
}

/// Input for [`LinkService::create_link`].
#[derive(Debug, Clone, Default)]
pub struct CreateLink {
    pub original_url: String,
    pub secret: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Owns the lifecycle rules of short links.
///
/// The service keeps no state between calls. Every operation reads the
/// current record from the repository, decides, and writes back through the
/// repository's revision check, so concurrent resolutions never lose clicks
/// and never revive an invalidated link.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    config: LinkServiceConfig,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>, config: LinkServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Creates a short link.
    ///
    /// An empty secret is treated as no secret. Expiration dates in the past
    /// are accepted; they take effect at resolution time.
    ///
    /// # Token collisions
    ///
    /// A token rejected by the repository as a duplicate is regenerated, up to
    /// 10 attempts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original_url` is not an absolute URL.
    /// Returns [`AppError::Internal`] if no free token is found or storage fails.
    pub async fn create_link(&self, input: CreateLink) -> Result<CreatedLink, AppError> {
        validate_target_url(&input.original_url).map_err(|e| {
            AppError::bad_request(
                "Invalid URL format",
                json!({ "reason": e.to_string(), "url": input.original_url }),
            )
        })?;

        let secret_hash = match input.secret.filter(|s| !s.is_empty()) {
            Some(secret) => Some(self.hash(secret).await?),
            None => None,
        };

        let link = self
            .insert_with_fresh_token(&input.original_url, secret_hash, input.expiration_date)
            .await?;

        info!(
            token = %link.short_token,
            protected = link.is_protected(),
            expires = ?link.expiration_date,
            "Link created"
        );
        metrics::counter!("links_created_total").increment(1);

        Ok(CreatedLink {
            link: self.share_url(&link.short_token),
            token: link.short_token,
            original_url: link.original_url,
            is_valid: link.is_valid,
        })
    }

    /// Resolves a token to its target URL and records the click.
    ///
    /// The stored link must pass the access pipeline (see
    /// [`crate::domain::access`]). The click is written with a revision check;
    /// if another writer got there first, the record is re-read and the whole
    /// pipeline runs again on the fresh state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token is unknown.
    /// Returns [`AppError::Forbidden`] with the first failing reason.
    /// Returns [`AppError::Conflict`] if contention persists across all attempts.
    pub async fn resolve(&self, token: &str, secret: Option<&str>) -> Result<String, AppError> {
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let link = self.find_link(token).await?;

            if let Err(denied) = self.check_access(link.clone(), secret).await? {
                warn!(token, reason = denied.reason(), "Resolution denied");
                metrics::counter!("link_resolutions_total", "outcome" => denied.reason())
                    .increment(1);
                return Err(denied.into());
            }

            match self.repository.update(&link.with_click()).await? {
                Some(saved) => {
                    debug!(token, clicks = saved.clicks, "Link resolved");
                    metrics::counter!("link_resolutions_total", "outcome" => "resolved")
                        .increment(1);
                    return Ok(saved.original_url);
                }
                None => debug!(token, attempt, "Concurrent update on resolve, retrying"),
            }
        }

        Err(contention(token))
    }

    /// Returns usage statistics without evaluating access rules.
    ///
    /// Works for expired and invalidated links alike.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token is unknown.
    pub async fn get_stats(&self, token: &str) -> Result<LinkStats, AppError> {
        Ok(self.find_link(token).await?.stats())
    }

    /// Permanently disables resolution of a link.
    ///
    /// Invalidating an already invalid link succeeds again.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token is unknown.
    /// Returns [`AppError::Conflict`] if contention persists across all attempts.
    pub async fn invalidate(&self, token: &str) -> Result<Link, AppError> {
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let link = self.find_link(token).await?;

            match self.repository.update(&link.invalidated()).await? {
                Some(saved) => {
                    info!(token, "Link invalidated");
                    return Ok(saved);
                }
                None => debug!(token, attempt, "Concurrent update on invalidate, retrying"),
            }
        }

        Err(contention(token))
    }

    /// Builds the public address of a token.
    pub fn share_url(&self, token: &str) -> String {
        format!("{}/links/{}", self.config.base_url.trim_end_matches('/'), token)
    }

    /// Returns true if the backing store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.repository.health_check().await
    }

    async fn find_link(&self, token: &str) -> Result<Link, AppError> {
        self.repository.find_by_token(token).await?.ok_or_else(|| {
            AppError::not_found("The link does not exist.", json!({ "token": token }))
        })
    }

    async fn insert_with_fresh_token(
        &self,
        original_url: &str,
        secret_hash: Option<String>,
        expiration_date: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        for _ in 0..MAX_TOKEN_ATTEMPTS {
            let new_link = NewLink {
                id: Uuid::new_v4(),
                original_url: original_url.to_string(),
                short_token: generate_token()?,
                secret_hash: secret_hash.clone(),
                expiration_date,
                created_at: Utc::now(),
            };
            let token = new_link.short_token.clone();

            match self.repository.insert(new_link).await {
                Err(AppError::Conflict { .. }) => {
                    warn!(token = %token, "Token collision, regenerating");
                }
                other => return other,
            }
        }

        Err(AppError::internal(
            "Failed to generate unique token",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Hashes a secret on the blocking pool.
    async fn hash(&self, secret: String) -> Result<String, AppError> {
        let cost = self.config.hash_cost;

        tokio::task::spawn_blocking(move || hash_secret(&secret, cost))
            .await
            .map_err(|e| AppError::internal("Hashing task failed", json!({ "reason": e.to_string() })))?
    }

    /// Runs the access pipeline on the blocking pool.
    ///
    /// The outer `Result` reports task failures, the inner one the decision.
    async fn check_access(
        &self,
        link: Link,
        secret: Option<&str>,
    ) -> Result<Result<(), AccessDenied>, AppError> {
        let secret = secret.map(str::to_owned);

        tokio::task::spawn_blocking(move || {
            authorize(&link, &AccessRequest::new(secret.as_deref()))
        })
        .await
        .map_err(|e| AppError::internal("Access check failed", json!({ "reason": e.to_string() })))
    }
}

fn contention(token: &str) -> AppError {
    AppError::conflict(
        "The link is being modified concurrently, please retry",
        json!({ "token": token }),
    )
}
