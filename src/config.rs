//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LISTEN="0.0.0.0:5000"
//! export BASE_URL="https://sho.rt"
//! export LOG_SINK="http"
//! export LOG_SINK_URL="http://localhost:9000/logs"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:5000`)
//! - `BASE_URL` - Public base used to build short URLs (default: `http://localhost:5000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DEFAULT_VALIDITY_MINUTES` - Validity when a request has none (default: 30)
//! - `LOG_QUEUE_CAPACITY` - Log event buffer size (default: 10000, min: 100)
//! - `LOG_SINK` - Log collector: `stdout`, `tracing`, `http`, `none` (default: `tracing`)
//! - `LOG_SINK_URL` - Collector endpoint, required when `LOG_SINK=http`
//! - `LOG_SINK_TIMEOUT_SECONDS` - Collector request timeout (default: 5)
//! - `LOG_STACK` - `stack` field of every log event (default: `backend`)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::application::services::short_url_service::DEFAULT_BASE_URL;
use crate::domain::event_logger::DEFAULT_STACK;
use crate::domain::validity::DEFAULT_VALIDITY_MINUTES;

/// Where log events produced by the service are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSinkKind {
    Stdout,
    Tracing,
    Http,
    None,
}

impl FromStr for LogSinkKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stdout" => Ok(Self::Stdout),
            "tracing" => Ok(Self::Tracing),
            "http" => Ok(Self::Http),
            "none" => Ok(Self::None),
            other => anyhow::bail!(
                "LOG_SINK must be one of 'stdout', 'tracing', 'http', 'none', got '{}'",
                other
            ),
        }
    }
}

impl fmt::Display for LogSinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stdout => "stdout",
            Self::Tracing => "tracing",
            Self::Http => "http",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Public base of generated short URLs, without trailing slash requirements.
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub default_validity_minutes: i64,
    pub log_queue_capacity: usize,
    pub log_sink: LogSinkKind,
    /// Collector endpoint for [`LogSinkKind::Http`].
    pub log_sink_url: Option<String>,
    pub log_sink_timeout_seconds: u64,
    pub log_stack: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            log_queue_capacity: 10_000,
            log_sink: LogSinkKind::Tracing,
            log_sink_url: None,
            log_sink_timeout_seconds: 5,
            log_stack: DEFAULT_STACK.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let base_url = env::var("BASE_URL").unwrap_or(defaults.base_url);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let default_validity_minutes = parse_var("DEFAULT_VALIDITY_MINUTES")?
            .unwrap_or(defaults.default_validity_minutes);

        let log_queue_capacity =
            parse_var("LOG_QUEUE_CAPACITY")?.unwrap_or(defaults.log_queue_capacity);

        let log_sink = parse_var("LOG_SINK")?.unwrap_or(defaults.log_sink);

        let log_sink_url = env::var("LOG_SINK_URL").ok().filter(|v| !v.is_empty());

        let log_sink_timeout_seconds =
            parse_var("LOG_SINK_TIMEOUT_SECONDS")?.unwrap_or(defaults.log_sink_timeout_seconds);

        let log_stack = env::var("LOG_STACK").unwrap_or(defaults.log_stack);

        Ok(Self {
            listen_addr,
            base_url,
            log_level,
            log_format,
            default_validity_minutes,
            log_queue_capacity,
            log_sink,
            log_sink_url,
            log_sink_timeout_seconds,
            log_stack,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not `host:port`
    /// - `base_url` is not an HTTP(S) URL
    /// - `log_format` is not `text` or `json`
    /// - `default_validity_minutes` is not positive
    /// - `log_queue_capacity` is outside 100..=1_000_000
    /// - the HTTP sink is selected without a valid `log_sink_url`
    /// - `log_sink_timeout_seconds` is 0
    /// - `log_stack` is empty
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !is_http_url(&self.base_url) {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.default_validity_minutes <= 0 {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES must be greater than 0, got {}",
                self.default_validity_minutes
            );
        }

        if self.log_queue_capacity < 100 {
            anyhow::bail!(
                "LOG_QUEUE_CAPACITY must be at least 100, got {}",
                self.log_queue_capacity
            );
        }

        if self.log_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "LOG_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.log_queue_capacity
            );
        }

        if self.log_sink == LogSinkKind::Http {
            match &self.log_sink_url {
                None => anyhow::bail!("LOG_SINK_URL must be set when LOG_SINK=http"),
                Some(url) if !is_http_url(url) => anyhow::bail!(
                    "LOG_SINK_URL must start with 'http://' or 'https://', got '{}'",
                    url
                ),
                Some(_) => {}
            }
        }

        if self.log_sink_timeout_seconds == 0 {
            anyhow::bail!("LOG_SINK_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.log_stack.trim().is_empty() {
            anyhow::bail!("LOG_STACK must not be empty");
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Default validity: {} minutes", self.default_validity_minutes);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        match (&self.log_sink, &self.log_sink_url) {
            (LogSinkKind::Http, Some(url)) => tracing::info!("  Log sink: http ({})", url),
            (sink, _) => tracing::info!("  Log sink: {}", sink),
        }

        tracing::info!("  Log queue capacity: {}", self.log_queue_capacity);
    }
}

/// Parses an optional environment variable.
///
/// Unset variables yield `Ok(None)`; set but unparsable ones are an error.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Invalid value for {}: '{}'", name, raw)),
        Err(_) => Ok(None),
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
