use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::log_event::LogEvent;
use crate::infrastructure::log_sink::LogSink;

/// Drains the log queue into `sink` until every sender is dropped.
///
/// Sink failures are traced and swallowed; they never reach the operation
/// that produced the event.
pub async fn run_log_worker(mut rx: mpsc::Receiver<LogEvent>, sink: Arc<dyn LogSink>) {
    while let Some(ev) = rx.recv().await {
        if let Err(e) = sink.write(&ev).await {
            tracing::warn!(
                sink = sink.name(),
                level = %ev.level,
                error = %e,
                "Failed to deliver log event"
            );
        }
    }

    tracing::debug!("Log worker stopped");
}
