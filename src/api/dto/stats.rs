//! DTOs for short URL statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use crate::domain::entities::ShortUrlStats;

/// Statistics for a single short URL.
///
/// Includes record metadata, total click count, and every recorded click in
/// the order they happened.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub shortcode: String,
    pub original_url: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
    pub total_clicks: usize,
    pub clicks: Vec<ClickInfo>,
}

impl From<ShortUrlStats> for StatsResponse {
    fn from(stats: ShortUrlStats) -> Self {
        Self {
            shortcode: stats.code,
            original_url: stats.original_url,
            created_at: stats.created_at,
            expires_at: stats.expires_at,
            total_clicks: stats.total_clicks,
            clicks: stats.clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
