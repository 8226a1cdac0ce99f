//! # Short URLs
//!
//! An in-memory URL shortening service built with Axum, with expiring links
//! and per-redirect click analytics.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, validity policy, repository trait, log events
//! - **Application Layer** ([`application`]) - Create, resolve, and stats orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory store and log collector sinks
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Custom or generated shortcodes
//! - Per-link validity in minutes (30 by default)
//! - Click tracking with timestamp, source, and location
//! - Structured log events shipped asynchronously to a collector
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:5000"
//! export LOG_SINK="stdout"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CreateShortUrl, ServiceSettings, ShortUrlService};
    pub use crate::domain::entities::{Click, ShortUrl, ShortUrlStats};
    pub use crate::domain::error::ShortUrlError;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
