//! Log event model for the external log collector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a [`LogEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry shipped to the log collector.
///
/// Serialized as:
///
/// ```json
/// {
///   "stack": "backend",
///   "level": "info",
///   "package": "service",
///   "message": "Created shortcode abc123 for URL https://example.com",
///   "timestamp": "2026-01-01T12:00:00Z"
/// }
/// ```
///
/// Created by [`crate::domain::event_logger::EventLogger`], queued without
/// blocking, then delivered by [`crate::domain::log_worker::run_log_worker`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub stack: String,
    pub level: LogLevel,
    pub package: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    pub fn new(
        stack: impl Into<String>,
        level: LogLevel,
        package: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stack: stack.into(),
            level,
            package: package.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
