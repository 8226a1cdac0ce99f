//! In-memory implementation of the short URL repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{Click, ShortUrl};
use crate::domain::error::ShortUrlError;
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::validity::ValidityPolicy;

/// Concurrent map from code to record.
///
/// Each key lives in one shard guarded by its own lock. Inserts go through the
/// entry API so the vacancy check and the write happen under that lock, and
/// click appends mutate the record under the same lock. Records live for as
/// long as the repository does; nothing is evicted.
#[derive(Debug, Default)]
pub struct InMemoryShortUrlRepository {
    records: DashMap<String, ShortUrl>,
}

impl InMemoryShortUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn exists(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    async fn insert(&self, record: ShortUrl) -> Result<ShortUrl, ShortUrlError> {
        match self.records.entry(record.code.clone()) {
            Entry::Occupied(existing) => Err(ShortUrlError::collision(existing.key().clone())),
            Entry::Vacant(slot) => Ok(slot.insert(record).value().clone()),
        }
    }

    async fn find_by_code(&self, code: &str) -> Option<ShortUrl> {
        self.records.get(code).map(|record| record.value().clone())
    }

    async fn record_click(
        &self,
        code: &str,
        click: Click,
        policy: ValidityPolicy,
    ) -> Result<String, ShortUrlError> {
        let mut record = self
            .records
            .get_mut(code)
            .ok_or_else(|| ShortUrlError::not_found(code))?;

        if policy.is_expired(&record, click.timestamp) {
            return Err(ShortUrlError::Expired {
                code: record.code.clone(),
                expired_at: record.expires_at,
            });
        }

        record.record_click(click);
        Ok(record.original_url.clone())
    }

    async fn count(&self) -> usize {
        self.records.len()
    }
}
