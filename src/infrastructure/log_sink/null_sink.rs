//! No-op sink for disabled log delivery.

use super::service::{LogSink, LogSinkResult};
use crate::domain::log_event::LogEvent;
use async_trait::async_trait;
use tracing::debug;

/// A sink that accepts and discards every event.
pub struct NullSink;

impl NullSink {
    pub fn new() -> Self {
        debug!("Using NullSink (log delivery disabled)");
        Self
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSink for NullSink {
    async fn write(&self, _event: &LogEvent) -> LogSinkResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
