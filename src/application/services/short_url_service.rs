//! Short URL creation, resolution, and statistics service.

use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::entities::{Click, ShortUrl, ShortUrlStats};
use crate::domain::error::ShortUrlError;
use crate::domain::event_logger::EventLogger;
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::validity::{DEFAULT_VALIDITY_MINUTES, ValidityPolicy};
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_target_url;

/// `package` attached to every log event emitted by the service.
const LOG_PACKAGE: &str = "service";

/// Attempts at finding a free generated code before giving up.
const MAX_GENERATE_ATTEMPTS: usize = 10;

/// Default public base used to build short URLs.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Tunables for [`ShortUrlService`].
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Public base the short code is appended to, e.g. `https://sho.rt`.
    pub base_url: String,
    /// Validity used when a create request does not carry one.
    pub default_validity_minutes: i64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
        }
    }
}

/// Input of [`ShortUrlService::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateShortUrl {
    pub url: String,
    pub validity_minutes: Option<i64>,
    pub shortcode: Option<String>,
}

impl CreateShortUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_validity(mut self, minutes: i64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn with_shortcode(mut self, shortcode: impl Into<String>) -> Self {
        self.shortcode = Some(shortcode.into());
        self
    }
}

/// Orchestrates the short URL lifecycle.
///
/// - **Create** validates input, picks a code, computes expiry, inserts atomically
/// - **Resolve** looks up a code, rejects expired records, records a click
/// - **Stats** returns a record's full click history, expired or not
///
/// Every outcome is reported to the [`EventLogger`]; logging never blocks
/// and never changes the result returned to the caller.
pub struct ShortUrlService<R: ShortUrlRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    logger: EventLogger,
    policy: ValidityPolicy,
    base_url: String,
}

impl<R: ShortUrlRepository> ShortUrlService<R> {
    /// Creates a new short URL service.
    pub fn new(
        repository: Arc<R>,
        clock: Arc<dyn Clock>,
        logger: EventLogger,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            repository,
            clock,
            logger,
            policy: ValidityPolicy::new(settings.default_validity_minutes),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short URL.
    ///
    /// # Code Selection
    ///
    /// - A non-blank `shortcode` is validated and used as-is
    /// - Otherwise a random code is generated, retrying on collision up to 10 times
    ///
    /// # Errors
    ///
    /// - [`ShortUrlError::InvalidUrl`] if `url` is not an absolute URL with an
    ///   `http` or `https` scheme and a host; other schemes such as `ftp:` or
    ///   `mailto:` are rejected even when syntactically valid
    /// - [`ShortUrlError::InvalidShortcode`] if the custom code breaks the shortcode rules
    /// - [`ShortUrlError::InvalidValidity`] if validity is not a positive number of minutes
    /// - [`ShortUrlError::CodeCollision`] if the code is already taken
    pub async fn create(&self, request: CreateShortUrl) -> Result<ShortUrl, ShortUrlError> {
        let original_url = validate_target_url(&request.url)
            .map_err(|e| {
                self.logger.error(LOG_PACKAGE, "Invalid URL input");
                ShortUrlError::InvalidUrl {
                    reason: e.to_string(),
                }
            })?
            .to_string();

        let custom_code = request.shortcode.filter(|code| !code.trim().is_empty());

        if let Some(code) = &custom_code {
            validate_custom_code(code).inspect_err(|_| {
                self.logger
                    .error(LOG_PACKAGE, format!("Invalid shortcode: {}", code));
            })?;
        }

        let created_at = self.clock.now();
        let expires_at = self
            .policy
            .compute_expiry(created_at, request.validity_minutes)
            .inspect_err(|e| {
                self.logger.error(LOG_PACKAGE, e.to_string());
            })?;

        let record = match custom_code {
            Some(code) => {
                let record = ShortUrl::new(code, original_url, created_at, expires_at);
                self.repository.insert(record).await.inspect_err(|e| {
                    if let ShortUrlError::CodeCollision { code } = e {
                        self.logger
                            .error(LOG_PACKAGE, format!("Shortcode collision: {}", code));
                    }
                })?
            }
            None => {
                self.insert_with_generated_code(original_url, created_at, expires_at)
                    .await?
            }
        };

        self.logger.info(
            LOG_PACKAGE,
            format!(
                "Created shortcode {} for URL {}",
                record.code, record.original_url
            ),
        );
        tracing::debug!(code = %record.code, expires_at = %record.expires_at, "Short URL created");

        Ok(record)
    }

    /// Resolves a code to its redirect target and records the click.
    ///
    /// `referrer` becomes the click source; `None` is recorded as `"direct"`.
    /// Every successful call appends exactly one click. The click history is
    /// never copied here, so the cost does not grow with the number of clicks.
    ///
    /// # Errors
    ///
    /// - [`ShortUrlError::NotFound`] if no record holds `code`
    /// - [`ShortUrlError::Expired`] if the record is past its expiry; no click is recorded
    pub async fn resolve(&self, code: &str, referrer: Option<&str>) -> Result<String, ShortUrlError> {
        let click = Click::new(self.clock.now(), referrer);

        match self.repository.record_click(code, click, self.policy).await {
            Ok(target) => {
                self.logger.info(
                    LOG_PACKAGE,
                    format!("Redirecting shortcode {} to {}", code, target),
                );
                Ok(target)
            }
            Err(e @ ShortUrlError::NotFound { .. }) => {
                self.logger
                    .error(LOG_PACKAGE, format!("Shortcode not found: {}", code));
                Err(e)
            }
            Err(e @ ShortUrlError::Expired { .. }) => {
                self.logger
                    .warn(LOG_PACKAGE, format!("Expired shortcode: {}", code));
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Returns a record together with its click history.
    ///
    /// Expired records are reported like live ones.
    ///
    /// # Errors
    ///
    /// Returns [`ShortUrlError::NotFound`] if no record holds `code`.
    pub async fn stats(&self, code: &str) -> Result<ShortUrlStats, ShortUrlError> {
        self.repository
            .find_by_code(code)
            .await
            .map(ShortUrlStats::from)
            .ok_or_else(|| {
                self.logger.error(
                    LOG_PACKAGE,
                    format!("Stats requested for missing shortcode: {}", code),
                );
                ShortUrlError::not_found(code)
            })
    }

    /// Builds the public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Number of stored records.
    pub async fn count(&self) -> usize {
        self.repository.count().await
    }

    pub fn logger(&self) -> &EventLogger {
        &self.logger
    }

    /// Inserts a record under a freshly generated code.
    ///
    /// A taken code is skipped; an insert that loses a race is retried with a
    /// new code.
    async fn insert_with_generated_code(
        &self,
        original_url: String,
        created_at: chrono::DateTime<chrono::Utc>,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<ShortUrl, ShortUrlError> {
        let mut last_code = String::new();

        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let code = generate_code();

            if self.repository.exists(&code).await {
                last_code = code;
                continue;
            }

            let record = ShortUrl::new(code, original_url.clone(), created_at, expires_at);
            match self.repository.insert(record).await {
                Ok(stored) => return Ok(stored),
                Err(ShortUrlError::CodeCollision { code }) => last_code = code,
                Err(e) => return Err(e),
            }
        }

        self.logger.error(
            LOG_PACKAGE,
            format!(
                "Shortcode collision: {} (gave up after {} attempts)",
                last_code, MAX_GENERATE_ATTEMPTS
            ),
        );

        Err(ShortUrlError::collision(last_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::log_event::{LogEvent, LogLevel};
    use crate::domain::repositories::MockShortUrlRepository;
    use crate::infrastructure::persistence::InMemoryShortUrlRepository;
    use crate::utils::code_generator::is_valid_shortcode;
    use chrono::{Duration, Utc};
    use tokio::sync::mpsc;

    struct Harness {
        service: Arc<ShortUrlService<InMemoryShortUrlRepository>>,
        clock: Arc<ManualClock>,
        logs: mpsc::Receiver<LogEvent>,
    }

    fn harness() -> Harness {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let (logger, logs) = EventLogger::channel(100, "backend");
        let service = ShortUrlService::new(
            Arc::new(InMemoryShortUrlRepository::new()),
            clock.clone(),
            logger,
            ServiceSettings::default(),
        );

        Harness {
            service: Arc::new(service),
            clock,
            logs,
        }
    }

    fn drain(logs: &mut mpsc::Receiver<LogEvent>) -> Vec<LogEvent> {
        let mut events = Vec::new();
        while let Ok(event) = logs.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_create_generates_valid_code() {
        let mut h = harness();

        let record = h
            .service
            .create(CreateShortUrl::new("https://example.com"))
            .await
            .unwrap();

        assert_eq!(record.code.len(), 6);
        assert!(is_valid_shortcode(&record.code));
        assert_eq!(record.original_url, "https://example.com");
        assert!(record.clicks.is_empty());
        assert_eq!(record.expires_at - record.created_at, Duration::minutes(30));

        let events = drain(&mut h.logs);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, LogLevel::Info);
        assert_eq!(events[0].package, "service");
        assert!(events[0].message.contains(&record.code));
    }

    #[tokio::test]
    async fn test_create_with_one_minute_validity() {
        let h = harness();

        let record = h
            .service
            .create(CreateShortUrl::new("https://example.com").with_validity(1))
            .await
            .unwrap();

        assert_eq!(record.created_at, h.clock.now());
        assert_eq!(
            (record.expires_at - record.created_at).num_milliseconds(),
            60_000
        );
    }

    #[tokio::test]
    async fn test_create_uses_configured_default_validity() {
        let clock = Arc::new(ManualClock::default());
        let service = ShortUrlService::new(
            Arc::new(InMemoryShortUrlRepository::new()),
            clock,
            EventLogger::disabled(),
            ServiceSettings {
                default_validity_minutes: 90,
                ..Default::default()
            },
        );

        let record = service
            .create(CreateShortUrl::new("https://example.com"))
            .await
            .unwrap();

        assert_eq!(record.expires_at - record.created_at, Duration::minutes(90));
    }

    #[tokio::test]
    async fn test_create_invalid_url_stores_nothing() {
        let mut h = harness();

        let result = h.service.create(CreateShortUrl::new("not a url")).await;

        assert!(matches!(result, Err(ShortUrlError::InvalidUrl { .. })));
        assert_eq!(h.service.count().await, 0);

        let events = drain(&mut h.logs);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, LogLevel::Error);
        assert_eq!(events[0].message, "Invalid URL input");
    }

    #[tokio::test]
    async fn test_create_empty_url_rejected() {
        let h = harness();

        let result = h.service.create(CreateShortUrl::new("")).await;

        assert!(matches!(result, Err(ShortUrlError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_create_with_custom_code() {
        let h = harness();

        let record = h
            .service
            .create(CreateShortUrl::new("https://example.com").with_shortcode("my_Code-1"))
            .await
            .unwrap();

        assert_eq!(record.code, "my_Code-1");
    }

    #[tokio::test]
    async fn test_create_blank_custom_code_is_generated() {
        let h = harness();

        let record = h
            .service
            .create(CreateShortUrl::new("https://example.com").with_shortcode("  "))
            .await
            .unwrap();

        assert_eq!(record.code.len(), 6);
    }

    #[tokio::test]
    async fn test_create_invalid_custom_code() {
        let mut h = harness();

        let result = h
            .service
            .create(CreateShortUrl::new("https://example.com").with_shortcode("a!"))
            .await;

        assert!(matches!(
            result,
            Err(ShortUrlError::InvalidShortcode { .. })
        ));
        assert_eq!(h.service.count().await, 0);
        assert_eq!(drain(&mut h.logs)[0].message, "Invalid shortcode: a!");
    }

    #[tokio::test]
    async fn test_create_invalid_validity() {
        let mut h = harness();

        let result = h
            .service
            .create(CreateShortUrl::new("https://example.com").with_validity(0))
            .await;

        assert_eq!(result, Err(ShortUrlError::InvalidValidity { minutes: 0 }));
        assert_eq!(h.service.count().await, 0);
        assert_eq!(drain(&mut h.logs)[0].level, LogLevel::Error);
    }

    #[tokio::test]
    async fn test_create_custom_code_conflict_never_overwrites() {
        let mut h = harness();
        h.service
            .create(CreateShortUrl::new("https://first.com").with_shortcode("taken"))
            .await
            .unwrap();

        let result = h
            .service
            .create(CreateShortUrl::new("https://second.com").with_shortcode("taken"))
            .await;

        assert_eq!(result, Err(ShortUrlError::collision("taken")));
        let stats = h.service.stats("taken").await.unwrap();
        assert_eq!(stats.original_url, "https://first.com");

        let events = drain(&mut h.logs);
        assert_eq!(events.last().unwrap().message, "Shortcode collision: taken");
    }

    #[tokio::test]
    async fn test_resolve_records_one_click_per_call() {
        let h = harness();
        h.service
            .create(CreateShortUrl::new("https://example.com").with_shortcode("abc"))
            .await
            .unwrap();

        let first = h.service.resolve("abc", Some("https://ref.example")).await;
        let second = h.service.resolve("abc", None).await;

        assert_eq!(first.unwrap(), "https://example.com");
        assert_eq!(second.unwrap(), "https://example.com");

        let stats = h.service.stats("abc").await.unwrap();
        assert_eq!(stats.total_clicks, 2);
        assert_eq!(stats.clicks[0].source, "https://ref.example");
        assert_eq!(stats.clicks[1].source, "direct");
        assert!(stats.clicks.iter().all(|c| c.location == "unknown"));
    }

    #[tokio::test]
    async fn test_resolve_click_timestamp_from_clock() {
        let h = harness();
        h.service
            .create(CreateShortUrl::new("https://example.com").with_shortcode("abc"))
            .await
            .unwrap();

        h.clock.advance(Duration::seconds(10));
        h.service.resolve("abc", None).await.unwrap();

        let stats = h.service.stats("abc").await.unwrap();
        assert_eq!(stats.clicks[0].timestamp, h.clock.now());
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut h = harness();

        let result = h.service.resolve("missing", None).await;

        assert_eq!(result, Err(ShortUrlError::not_found("missing")));
        assert_eq!(
            drain(&mut h.logs)[0].message,
            "Shortcode not found: missing"
        );
    }

    #[tokio::test]
    async fn test_resolve_at_expiry_instant_succeeds() {
        let h = harness();
        h.service
            .create(
                CreateShortUrl::new("https://example.com")
                    .with_shortcode("edge")
                    .with_validity(1),
            )
            .await
            .unwrap();

        h.clock.advance(Duration::minutes(1));

        assert!(h.service.resolve("edge", None).await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_expired_records_no_click() {
        let mut h = harness();
        let record = h
            .service
            .create(
                CreateShortUrl::new("https://example.com")
                    .with_shortcode("old")
                    .with_validity(1),
            )
            .await
            .unwrap();

        assert!(h.service.resolve("old", None).await.is_ok());

        h.clock.advance(Duration::minutes(1) + Duration::milliseconds(1));
        let result = h.service.resolve("old", None).await;

        assert_eq!(
            result,
            Err(ShortUrlError::Expired {
                code: "old".to_string(),
                expired_at: record.expires_at,
            })
        );
        let stats = h.service.stats("old").await.unwrap();
        assert_eq!(stats.total_clicks, 1);

        let events = drain(&mut h.logs);
        let last = events.last().unwrap();
        assert_eq!(last.level, LogLevel::Warn);
        assert_eq!(last.message, "Expired shortcode: old");
    }

    #[tokio::test]
    async fn test_stats_on_expired_code_still_succeeds() {
        let h = harness();
        h.service
            .create(
                CreateShortUrl::new("https://example.com")
                    .with_shortcode("old")
                    .with_validity(1),
            )
            .await
            .unwrap();

        h.clock.advance(Duration::hours(1));

        let stats = h.service.stats("old").await.unwrap();
        assert_eq!(stats.code, "old");
        assert_eq!(stats.total_clicks, 0);
    }

    #[tokio::test]
    async fn test_stats_not_found() {
        let mut h = harness();

        let result = h.service.stats("missing").await;

        assert_eq!(result, Err(ShortUrlError::not_found("missing")));
        assert_eq!(
            drain(&mut h.logs)[0].message,
            "Stats requested for missing shortcode: missing"
        );
    }

    #[tokio::test]
    async fn test_short_url_trims_trailing_slash() {
        let service = ShortUrlService::new(
            Arc::new(InMemoryShortUrlRepository::new()),
            Arc::new(ManualClock::default()),
            EventLogger::disabled(),
            ServiceSettings {
                base_url: "https://sho.rt/".to_string(),
                ..Default::default()
            },
        );

        assert_eq!(service.short_url("abc123"), "https://sho.rt/abc123");
    }

    #[tokio::test]
    async fn test_logging_failure_does_not_affect_result() {
        let (logger, rx) = EventLogger::channel(1, "backend");
        drop(rx);
        let service = ShortUrlService::new(
            Arc::new(InMemoryShortUrlRepository::new()),
            Arc::new(ManualClock::default()),
            logger,
            ServiceSettings::default(),
        );

        let record = service
            .create(CreateShortUrl::new("https://example.com"))
            .await
            .unwrap();

        assert_eq!(
            service.resolve(&record.code, None).await.unwrap(),
            "https://example.com"
        );
        assert!(matches!(
            service.resolve("nope", None).await,
            Err(ShortUrlError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_generated_code_retries_after_collision() {
        let mut mock_repo = MockShortUrlRepository::new();

        let mut taken = 2;
        mock_repo.expect_exists().times(3).returning(move |_| {
            if taken > 0 {
                taken -= 1;
                true
            } else {
                false
            }
        });
        mock_repo
            .expect_insert()
            .times(1)
            .returning(|record| Ok(record));

        let service = ShortUrlService::new(
            Arc::new(mock_repo),
            Arc::new(ManualClock::default()),
            EventLogger::disabled(),
            ServiceSettings::default(),
        );

        let result = service.create(CreateShortUrl::new("https://example.com")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_generated_code_retries_lost_insert_race() {
        let mut mock_repo = MockShortUrlRepository::new();

        mock_repo.expect_exists().returning(|_| false);

        let mut lost = 1;
        mock_repo.expect_insert().times(2).returning(move |record| {
            if lost > 0 {
                lost -= 1;
                Err(ShortUrlError::collision(record.code))
            } else {
                Ok(record)
            }
        });

        let service = ShortUrlService::new(
            Arc::new(mock_repo),
            Arc::new(ManualClock::default()),
            EventLogger::disabled(),
            ServiceSettings::default(),
        );

        assert!(
            service
                .create(CreateShortUrl::new("https://example.com"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_resolve_does_not_copy_record() {
        let mut mock_repo = MockShortUrlRepository::new();

        mock_repo.expect_find_by_code().times(0);
        mock_repo
            .expect_record_click()
            .withf(|code, click, _| code == "hot" && click.source == "direct")
            .times(1)
            .returning(|_, _, _| Ok("https://example.com".to_string()));

        let service = ShortUrlService::new(
            Arc::new(mock_repo),
            Arc::new(ManualClock::default()),
            EventLogger::disabled(),
            ServiceSettings::default(),
        );

        let target = service.resolve("hot", None).await.unwrap();

        assert_eq!(target, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_cost_does_not_grow_with_clicks() {
        let h = harness();
        for code in ["hot", "cold"] {
            h.service
                .create(CreateShortUrl::new("https://example.com").with_shortcode(code))
                .await
                .unwrap();
        }

        for _ in 0..20_000 {
            h.service.resolve("hot", None).await.unwrap();
        }

        let time = |code: &'static str| {
            let service = h.service.clone();
            async move {
                let start = std::time::Instant::now();
                for _ in 0..200 {
                    service.resolve(code, None).await.unwrap();
                }
                start.elapsed()
            }
        };

        let cold = time("cold").await;
        let hot = time("hot").await;

        assert!(
            hot < cold * 20 + std::time::Duration::from_millis(20),
            "hot={hot:?} cold={cold:?}"
        );
        assert_eq!(h.service.stats("hot").await.unwrap().total_clicks, 20_200);
    }

    #[tokio::test]
    async fn test_generated_code_gives_up() {
        let mut mock_repo = MockShortUrlRepository::new();

        mock_repo
            .expect_exists()
            .times(MAX_GENERATE_ATTEMPTS)
            .returning(|_| true);
        mock_repo.expect_insert().times(0);

        let service = ShortUrlService::new(
            Arc::new(mock_repo),
            Arc::new(ManualClock::default()),
            EventLogger::disabled(),
            ServiceSettings::default(),
        );

        let result = service.create(CreateShortUrl::new("https://example.com")).await;

        assert!(matches!(result, Err(ShortUrlError::CodeCollision { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_custom_code_race_has_one_winner() {
        let h = harness();

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let service = h.service.clone();
                tokio::spawn(async move {
                    service
                        .create(
                            CreateShortUrl::new(format!("https://example.com/{}", i))
                                .with_shortcode("race"),
                        )
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut collisions = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => successes += 1,
                Err(ShortUrlError::CodeCollision { .. }) => collisions += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(collisions, 31);
        assert_eq!(h.service.count().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_resolves_lose_no_clicks() {
        let h = harness();
        h.service
            .create(CreateShortUrl::new("https://example.com").with_shortcode("hot"))
            .await
            .unwrap();

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let service = h.service.clone();
                tokio::spawn(async move { service.resolve("hot", None).await })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap().is_ok());
        }

        let stats = h.service.stats("hot").await.unwrap();
        assert_eq!(stats.total_clicks, 50);
        assert_eq!(stats.clicks.len(), stats.total_clicks);
    }
}
