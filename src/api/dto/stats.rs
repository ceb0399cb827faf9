//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkStats;

/// Response body for `GET /links/{token}/stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub shortened_url: String,
    pub original_url: String,
    pub clicks: i64,
    pub is_valid: bool,
    pub created_at: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            shortened_url: stats.token,
            original_url: stats.original_url,
            clicks: stats.clicks,
            is_valid: stats.is_valid,
            created_at: stats.created_at,
            expiration_date: stats.expiration_date,
        }
    }
}
