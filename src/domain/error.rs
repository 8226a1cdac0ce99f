//! Failure taxonomy of the short URL lifecycle.

use chrono::{DateTime, Utc};

/// Errors returned by the short URL core.
///
/// Every variant is a recoverable, caller-facing condition. The transport
/// layer maps them onto HTTP statuses (see [`crate::error::AppError`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortUrlError {
    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("Invalid shortcode '{code}': {reason}")]
    InvalidShortcode { code: String, reason: String },

    #[error("Invalid validity: {minutes} minutes")]
    InvalidValidity { minutes: i64 },

    #[error("Shortcode already exists: {code}")]
    CodeCollision { code: String },

    #[error("Shortcode not found: {code}")]
    NotFound { code: String },

    #[error("Link expired: {code}")]
    Expired {
        code: String,
        expired_at: DateTime<Utc>,
    },
}

impl ShortUrlError {
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn collision(code: impl Into<String>) -> Self {
        Self::CodeCollision { code: code.into() }
    }

    pub fn invalid_shortcode(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidShortcode {
            code: code.into(),
            reason: reason.into(),
        }
    }
}
