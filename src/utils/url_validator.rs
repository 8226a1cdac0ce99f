//! Redirect target validation.
//!
//! Targets must be absolute HTTP(S) URLs with a host. The caller's string is
//! kept verbatim; validation never rewrites it.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a redirect target and returns it trimmed.
///
/// # Security
///
/// Rejects schemes like `javascript:`, `data:`, `file:` that would turn a
/// redirect into something other than navigation.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for empty or whitespace-only input
/// - [`UrlValidationError::InvalidFormat`] for strings that do not parse as absolute URLs
/// - [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes
/// - [`UrlValidationError::MissingHost`] when no host is present
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_target_url(" https://example.com ").unwrap(), "https://example.com");
/// assert!(validate_target_url("not a url").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<&str, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed)
}
