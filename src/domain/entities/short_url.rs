//! Short URL record and its statistics view.

use chrono::{DateTime, Utc};

use super::click::Click;

/// A short code mapped to its redirect target.
///
/// Everything except `clicks` is fixed at creation. `clicks` only ever grows;
/// existing entries are never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: Vec<Click>,
}

impl ShortUrl {
    /// Creates a record with no clicks.
    pub fn new(
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            original_url,
            created_at,
            expires_at,
            clicks: Vec::new(),
        }
    }

    pub fn total_clicks(&self) -> usize {
        self.clicks.len()
    }

    pub fn record_click(&mut self, click: Click) {
        self.clicks.push(click);
    }
}

/// Read model returned by the stats operation.
///
/// `total_clicks` always equals `clicks.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrlStats {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub total_clicks: usize,
    pub clicks: Vec<Click>,
}

impl From<ShortUrl> for ShortUrlStats {
    fn from(record: ShortUrl) -> Self {
        Self {
            total_clicks: record.clicks.len(),
            code: record.code,
            original_url: record.original_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            clicks: record.clicks,
        }
    }
}
