//! Log collector sinks.
//!
//! Provides a [`LogSink`] trait with four implementations:
//! - [`StdoutSink`] - Newline-delimited JSON on stdout
//! - [`TracingSink`] - Forwarded into the `tracing` subscriber
//! - [`HttpSink`] - POSTed to a remote collector
//! - [`NullSink`] - Discarded

mod http_sink;
mod null_sink;
mod service;
mod stdout_sink;
mod tracing_sink;

pub use http_sink::HttpSink;
pub use null_sink::NullSink;
pub use service::{LogSink, LogSinkError, LogSinkResult};
pub use stdout_sink::StdoutSink;
pub use tracing_sink::TracingSink;
