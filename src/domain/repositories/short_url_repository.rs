//! Repository trait for short URL storage.

use crate::domain::entities::{Click, ShortUrl};
use crate::domain::error::ShortUrlError;
use crate::domain::validity::ValidityPolicy;
use async_trait::async_trait;

/// Keyed store of short URL records.
///
/// Codes are unique: [`insert`](ShortUrlRepository::insert) must perform its
/// existence check and write as one atomic step, so two concurrent inserts of
/// the same code can never both succeed. Lookups do not filter by expiry.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryShortUrlRepository`] - Concurrent in-memory map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Returns true if a record exists for `code`.
    async fn exists(&self, code: &str) -> bool;

    /// Inserts a record under its code if no record holds that code yet.
    ///
    /// # Errors
    ///
    /// Returns [`ShortUrlError::CodeCollision`] if the code is already taken.
    /// The existing record is left untouched.
    async fn insert(&self, record: ShortUrl) -> Result<ShortUrl, ShortUrlError>;

    /// Finds a record by its code, expired or not.
    ///
    /// Returns a full copy, click history included.
    async fn find_by_code(&self, code: &str) -> Option<ShortUrl>;

    /// Appends `click` to a live record and returns its target URL.
    ///
    /// The expiry check (against `click.timestamp`) and the append happen as
    /// one step on the stored record. Only the target URL is copied out.
    ///
    /// # Errors
    ///
    /// - [`ShortUrlError::NotFound`] if no record holds `code`
    /// - [`ShortUrlError::Expired`] if `policy` reports the record expired; no click is recorded
    async fn record_click(
        &self,
        code: &str,
        click: Click,
        policy: ValidityPolicy,
    ) -> Result<String, ShortUrlError>;

    /// Number of stored records, expired ones included.
    async fn count(&self) -> usize;
}
