//! Log sink trait and error types.

use async_trait::async_trait;
use std::fmt;

use crate::domain::log_event::LogEvent;

/// Errors that can occur while delivering a log event.
#[derive(Debug)]
pub enum LogSinkError {
    Serialization(String),
    Delivery(String),
}

impl fmt::Display for LogSinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Serialization(e) => write!(f, "Log serialization error: {}", e),
            Self::Delivery(e) => write!(f, "Log delivery error: {}", e),
        }
    }
}

impl std::error::Error for LogSinkError {}

/// Result type for log sink operations.
pub type LogSinkResult<T> = Result<T, LogSinkError>;

/// Destination for log events.
///
/// Called only from the background log worker, never on a request path.
/// Errors are reported to the worker, which traces and discards them.
///
/// # Implementations
///
/// - [`crate::infrastructure::log_sink::StdoutSink`] - One JSON line per event on stdout
/// - [`crate::infrastructure::log_sink::TracingSink`] - Re-emits through `tracing`
/// - [`crate::infrastructure::log_sink::HttpSink`] - POSTs to a remote collector
/// - [`crate::infrastructure::log_sink::NullSink`] - Discards everything
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Delivers a single event.
    async fn write(&self, event: &LogEvent) -> LogSinkResult<()>;

    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;
}
