//! Fire-and-forget handle for emitting log events.

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::debug;

use super::log_event::{LogEvent, LogLevel};

/// Default `stack` value attached to every event.
pub const DEFAULT_STACK: &str = "backend";

/// Cloneable sender side of the log queue.
///
/// [`log`](EventLogger::log) never blocks and never fails: if the bounded
/// queue is full or the worker has stopped, the event is dropped. Delivery is
/// attempted, not guaranteed.
#[derive(Debug, Clone)]
pub struct EventLogger {
    tx: mpsc::Sender<LogEvent>,
    stack: String,
}

impl EventLogger {
    pub fn new(tx: mpsc::Sender<LogEvent>, stack: impl Into<String>) -> Self {
        Self {
            tx,
            stack: stack.into(),
        }
    }

    /// Creates a logger together with the receiving end of its queue.
    pub fn channel(capacity: usize, stack: impl Into<String>) -> (Self, mpsc::Receiver<LogEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx, stack), rx)
    }

    /// A logger whose events go nowhere.
    pub fn disabled() -> Self {
        let (tx, _) = mpsc::channel(1);
        Self::new(tx, DEFAULT_STACK)
    }

    pub fn log(&self, level: LogLevel, package: &str, message: impl Into<String>) {
        let event = LogEvent::new(self.stack.clone(), level, package, message);

        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(ev)) => {
                debug!(message = %ev.message, "Log queue full, dropping event");
            }
            Err(TrySendError::Closed(ev)) => {
                debug!(message = %ev.message, "Log queue closed, dropping event");
            }
        }
    }

    pub fn info(&self, package: &str, message: impl Into<String>) {
        self.log(LogLevel::Info, package, message);
    }

    pub fn warn(&self, package: &str, message: impl Into<String>) {
        self.log(LogLevel::Warn, package, message);
    }

    pub fn error(&self, package: &str, message: impl Into<String>) {
        self.log(LogLevel::Error, package, message);
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Free slots currently available in the queue.
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }

    pub fn max_capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}
