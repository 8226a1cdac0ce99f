//! HTTP server initialization and runtime setup.
//!
//! Handles store setup, log collector wiring, worker spawning, and Axum server lifecycle.

use crate::application::services::{ServiceSettings, ShortUrlService};
use crate::config::{Config, LogSinkKind};
use crate::domain::clock::SystemClock;
use crate::domain::event_logger::EventLogger;
use crate::domain::log_worker::run_log_worker;
use crate::infrastructure::log_sink::{HttpSink, LogSink, NullSink, StdoutSink, TracingSink};
use crate::infrastructure::persistence::InMemoryShortUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Time allowed for the log worker to drain queued events after shutdown.
const LOG_DRAIN_TIMEOUT_SECS: u64 = 5;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory short URL store
/// - Log collector sink and background log worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The log sink cannot be constructed
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let sink = build_sink(&config)?;
    tracing::info!("Log sink: {}", sink.name());

    let (logger, log_rx) = EventLogger::channel(config.log_queue_capacity, config.log_stack.clone());
    let log_worker = tokio::spawn(run_log_worker(log_rx, sink));
    tracing::info!("Log worker started");

    let repository = Arc::new(InMemoryShortUrlRepository::new());
    let settings = ServiceSettings {
        base_url: config.base_url.clone(),
        default_validity_minutes: config.default_validity_minutes,
    };
    let service = ShortUrlService::new(repository, Arc::new(SystemClock), logger, settings);

    let state = AppState::new(Arc::new(service));
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its logger are dropped once serve returns, closing the queue.
    match tokio::time::timeout(Duration::from_secs(LOG_DRAIN_TIMEOUT_SECS), log_worker).await {
        Ok(_) => tracing::info!("Log worker drained"),
        Err(_) => tracing::warn!(
            "Log worker did not drain within {} seconds",
            LOG_DRAIN_TIMEOUT_SECS
        ),
    }

    Ok(())
}

/// Builds the log collector selected by `LOG_SINK`.
fn build_sink(config: &Config) -> Result<Arc<dyn LogSink>> {
    let sink: Arc<dyn LogSink> = match config.log_sink {
        LogSinkKind::Stdout => Arc::new(StdoutSink::new()),
        LogSinkKind::Tracing => Arc::new(TracingSink::new()),
        LogSinkKind::None => Arc::new(NullSink::new()),
        LogSinkKind::Http => {
            let url = config
                .log_sink_url
                .as_deref()
                .context("LOG_SINK_URL must be set when LOG_SINK=http")?;
            let timeout = Duration::from_secs(config.log_sink_timeout_seconds);
            Arc::new(HttpSink::new(url, timeout).context("Failed to build HTTP log sink")?)
        }
    };

    Ok(sink)
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sink_by_kind() {
        let cases = [
            (LogSinkKind::Stdout, "stdout"),
            (LogSinkKind::Tracing, "tracing"),
            (LogSinkKind::None, "none"),
        ];

        for (kind, name) in cases {
            let config = Config {
                log_sink: kind,
                ..Default::default()
            };
            assert_eq!(build_sink(&config).unwrap().name(), name);
        }
    }

    #[test]
    fn test_http_sink_without_url_fails() {
        let config = Config {
            log_sink: LogSinkKind::Http,
            ..Default::default()
        };
        assert!(build_sink(&config).is_err());
    }

    #[tokio::test]
    async fn test_http_sink_with_url() {
        let config = Config {
            log_sink: LogSinkKind::Http,
            log_sink_url: Some("http://127.0.0.1:9000/logs".to_string()),
            ..Default::default()
        };
        assert_eq!(build_sink(&config).unwrap().name(), "http");
    }
}
