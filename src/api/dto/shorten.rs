//! DTOs for the short URL creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CreateShortUrl;
use crate::domain::entities::ShortUrl;

/// Request to create a short URL.
///
/// ```json
/// { "url": "https://example.com", "validity": 30, "shortcode": "my-link" }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortUrlRequest {
    /// The redirect target (absolute HTTP/HTTPS URL).
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: String,

    /// Validity in whole minutes. Defaults to the configured validity.
    #[serde(default)]
    pub validity: Option<i64>,

    /// Optional custom short code (3-20 of `[A-Za-z0-9_-]`).
    #[serde(default)]
    pub shortcode: Option<String>,
}

impl From<CreateShortUrlRequest> for CreateShortUrl {
    fn from(request: CreateShortUrlRequest) -> Self {
        Self {
            url: request.url,
            validity_minutes: request.validity,
            shortcode: request.shortcode,
        }
    }
}

/// Response for a created short URL.
///
/// Timestamps are epoch milliseconds.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlResponse {
    pub shortcode: String,
    pub original_url: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
    pub short_url: String,
}

impl CreateShortUrlResponse {
    pub fn new(record: ShortUrl, short_url: String) -> Self {
        Self {
            shortcode: record.code,
            original_url: record.original_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            short_url,
        }
    }
}
