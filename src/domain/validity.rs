//! Validity window and expiry computation.

use chrono::{DateTime, Duration, Utc};

use super::entities::ShortUrl;
use super::error::ShortUrlError;

/// Validity applied when the caller does not specify one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Computes when a short URL stops resolving.
///
/// # Rules
///
/// - No validity supplied: the policy default is used
/// - Supplied validity must be a whole number of minutes, at least 1
/// - Expiry that does not fit the representable time range is rejected
///
/// Together these keep `expires_at > created_at` for every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPolicy {
    default_minutes: i64,
}

impl ValidityPolicy {
    /// Creates a policy with a custom default.
    ///
    /// Non-positive defaults fall back to [`DEFAULT_VALIDITY_MINUTES`].
    pub fn new(default_minutes: i64) -> Self {
        let default_minutes = if default_minutes > 0 {
            default_minutes
        } else {
            DEFAULT_VALIDITY_MINUTES
        };

        Self { default_minutes }
    }

    pub fn default_minutes(&self) -> i64 {
        self.default_minutes
    }

    /// Returns `created_at + validity`.
    ///
    /// # Errors
    ///
    /// Returns [`ShortUrlError::InvalidValidity`] for zero, negative, or
    /// overflowing validity values.
    pub fn compute_expiry(
        &self,
        created_at: DateTime<Utc>,
        validity_minutes: Option<i64>,
    ) -> Result<DateTime<Utc>, ShortUrlError> {
        let minutes = validity_minutes.unwrap_or(self.default_minutes);

        if minutes <= 0 {
            return Err(ShortUrlError::InvalidValidity { minutes });
        }

        Duration::try_minutes(minutes)
            .and_then(|validity| created_at.checked_add_signed(validity))
            .ok_or(ShortUrlError::InvalidValidity { minutes })
    }

    /// Returns true once `now` is strictly past the record's `expires_at`.
    ///
    /// A record still resolves at exactly its expiry instant.
    pub fn is_expired(&self, record: &ShortUrl, now: DateTime<Utc>) -> bool {
        now > record.expires_at
    }
}

impl Default for ValidityPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_VALIDITY_MINUTES)
    }
}
