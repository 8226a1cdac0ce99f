//! Repository implementations.
//!
//! - [`InMemoryShortUrlRepository`] - Short URL storage for the process lifetime

pub mod in_memory_short_url_repository;

pub use in_memory_short_url_repository::InMemoryShortUrlRepository;
