//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations by coordinating repository calls,
//! validation, and business rules, and give HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::short_url_service::ShortUrlService`] - Create, resolve, and stats for short URLs

pub mod services;
