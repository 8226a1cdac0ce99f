//! Sink forwarding events into the process `tracing` subscriber.

use super::service::{LogSink, LogSinkResult};
use crate::domain::log_event::{LogEvent, LogLevel};
use async_trait::async_trait;

/// Re-emits log events as `tracing` events under the `collector` target.
///
/// `fatal` has no `tracing` counterpart and is emitted at `ERROR`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LogSink for TracingSink {
    async fn write(&self, event: &LogEvent) -> LogSinkResult<()> {
        let LogEvent {
            stack,
            level,
            package,
            message,
            ..
        } = event;

        match level {
            LogLevel::Debug => {
                tracing::debug!(target: "collector", %stack, %package, "{}", message)
            }
            LogLevel::Info => {
                tracing::info!(target: "collector", %stack, %package, "{}", message)
            }
            LogLevel::Warn => {
                tracing::warn!(target: "collector", %stack, %package, "{}", message)
            }
            LogLevel::Error => {
                tracing::error!(target: "collector", %stack, %package, "{}", message)
            }
            LogLevel::Fatal => {
                tracing::error!(target: "collector", %stack, %package, fatal = true, "{}", message)
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}
