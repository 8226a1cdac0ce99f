//! Core domain entities.
//!
//! - [`ShortUrl`] - A short code mapped to a target URL, with its click history
//! - [`ShortUrlStats`] - The read model served by the stats operation
//! - [`Click`] - A single served redirect

pub mod click;
pub mod short_url;

pub use click::{Click, DIRECT_SOURCE, UNKNOWN_LOCATION};
pub use short_url::{ShortUrl, ShortUrlStats};
