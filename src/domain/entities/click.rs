//! Click entity representing a single served redirect.

use chrono::{DateTime, Utc};

/// Source recorded when the redirect request carried no referrer.
pub const DIRECT_SOURCE: &str = "direct";

/// Placeholder location. No geolocation is performed.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// A click recorded when a short code is resolved.
///
/// `source` is whatever referrer the caller supplied and is never validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub location: String,
}

impl Click {
    /// Creates a click, falling back to [`DIRECT_SOURCE`] when no referrer is given.
    ///
    /// An empty referrer counts as absent. Anything else is stored as received.
    pub fn new(timestamp: DateTime<Utc>, referrer: Option<&str>) -> Self {
        let source = referrer
            .filter(|s| !s.is_empty())
            .unwrap_or(DIRECT_SOURCE);

        Self {
            timestamp,
            source: source.to_string(),
            location: UNKNOWN_LOCATION.to_string(),
        }
    }
}
