#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use shorturls::application::services::{CreateShortUrl, ServiceSettings, ShortUrlService};
use shorturls::domain::clock::ManualClock;
use shorturls::domain::entities::ShortUrl;
use shorturls::domain::event_logger::EventLogger;
use shorturls::domain::log_event::LogEvent;
use shorturls::infrastructure::persistence::InMemoryShortUrlRepository;
use shorturls::routes::router;
use shorturls::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const TEST_BASE_URL: &str = "http://localhost:5000";

pub fn test_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

pub fn create_test_state() -> (AppState, Arc<ManualClock>, mpsc::Receiver<LogEvent>) {
    let clock = Arc::new(ManualClock::new(test_start()));
    let (logger, rx) = EventLogger::channel(100, "backend");

    let service = ShortUrlService::new(
        Arc::new(InMemoryShortUrlRepository::new()),
        clock.clone(),
        logger,
        ServiceSettings {
            base_url: TEST_BASE_URL.to_string(),
            default_validity_minutes: 30,
        },
    );

    (AppState::new(Arc::new(service)), clock, rx)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

pub async fn create_test_link(state: &AppState, code: &str, url: &str) -> ShortUrl {
    state
        .short_url_service
        .create(CreateShortUrl::new(url).with_shortcode(code))
        .await
        .unwrap()
}

/// Drains every log event queued so far.
pub fn drain_logs(rx: &mut mpsc::Receiver<LogEvent>) -> Vec<LogEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
