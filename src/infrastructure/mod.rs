//! Infrastructure layer for storage and external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`log_sink`] - Log collector delivery (stdout, tracing, HTTP, no-op)
//! - [`persistence`] - Short URL store implementations

pub mod log_sink;
pub mod persistence;
