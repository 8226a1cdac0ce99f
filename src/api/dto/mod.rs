//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization; request bodies are checked with
//! validator before reaching the service.

pub mod clicks;
pub mod health;
pub mod shorten;
pub mod stats;
