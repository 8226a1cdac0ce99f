//! Domain layer containing the short URL lifecycle.
//!
//! # Architecture
//!
//! - [`entities`] - Short URL records, clicks, and the stats view
//! - [`repositories`] - Storage trait definitions
//! - [`validity`] - Expiry computation and checks
//! - [`clock`] - Injectable time source
//! - [`error`] - Failure taxonomy
//! - [`log_event`] - Log collector event model
//! - [`event_logger`] - Non-blocking log handle
//! - [`log_worker`] - Background delivery of log events
//!
//! # Log Delivery Flow
//!
//! 1. The service calls [`event_logger::EventLogger::log`]
//! 2. The [`log_event::LogEvent`] is pushed onto a bounded channel (dropped if full)
//! 3. [`log_worker::run_log_worker`] hands each event to the configured sink
//! 4. Sink failures are traced and discarded

pub mod clock;
pub mod entities;
pub mod error;
pub mod event_logger;
pub mod log_event;
pub mod log_worker;
pub mod repositories;
pub mod validity;
