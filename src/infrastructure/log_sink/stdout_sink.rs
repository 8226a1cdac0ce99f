//! Sink writing one JSON document per line to stdout.

use std::io::Write;

use super::service::{LogSink, LogSinkError, LogSinkResult};
use crate::domain::log_event::LogEvent;
use async_trait::async_trait;

/// Writes events as newline-delimited JSON to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }

    /// Renders the line written for `event`, without the trailing newline.
    pub fn render(event: &LogEvent) -> LogSinkResult<String> {
        serde_json::to_string(event).map_err(|e| LogSinkError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl LogSink for StdoutSink {
    async fn write(&self, event: &LogEvent) -> LogSinkResult<()> {
        let line = Self::render(event)?;

        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", line).map_err(|e| LogSinkError::Delivery(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}
