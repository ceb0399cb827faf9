//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, original_url, short_token, secret_hash, expiration_date, \
                            clicks, is_valid, created_at, revision";

/// Row shape of the `links` table.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: Uuid,
    original_url: String,
    short_token: String,
    secret_hash: Option<String>,
    expiration_date: Option<DateTime<Utc>>,
    clicks: i64,
    is_valid: bool,
    created_at: DateTime<Utc>,
    revision: i64,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            id: row.id,
            original_url: row.original_url,
            short_token: row.short_token,
            secret_hash: row.secret_hash,
            expiration_date: row.expiration_date,
            clicks: row.clicks,
            is_valid: row.is_valid,
            created_at: row.created_at,
            revision: row.revision,
        }
    }
}

/// PostgreSQL repository for link storage.
///
/// Uses bound parameters for every query. The unique constraint
/// `links_short_token_key` enforces token uniqueness; violations surface as
/// [`AppError::Conflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_token = $1"
        ))
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links (id, original_url, short_token, secret_hash, expiration_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(new_link.id)
        .bind(&new_link.original_url)
        .bind(&new_link.short_token)
        .bind(&new_link.secret_hash)
        .bind(new_link.expiration_date)
        .bind(new_link.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, link: &Link) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            UPDATE links
            SET clicks = $2,
                is_valid = is_valid AND $3,
                revision = revision + 1
            WHERE short_token = $1 AND revision = $4
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&link.short_token)
        .bind(link.clicks)
        .bind(link.is_valid)
        .bind(link.revision)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| tracing::warn!(error = %e, "Database health check failed"))
            .is_ok()
    }
}
