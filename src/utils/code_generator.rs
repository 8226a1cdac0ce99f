//! Short code generation and validation utilities.
//!
//! Random codes are drawn from the thread-local RNG; custom codes supplied by
//! callers are checked against the shortcode pattern and the reserved list.

use crate::domain::error::ShortUrlError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;

/// Length of generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

pub const MIN_CODE_LENGTH: usize = 3;
pub const MAX_CODE_LENGTH: usize = 20;

/// Compiled regex for custom shortcode validation.
static SHORTCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,20}$").unwrap());

/// Reserved codes that cannot be used as short links.
///
/// These match fixed routes and would never reach the redirect handler.
const RESERVED_CODES: &[&str] = &["shorturls", "health"];

/// Generates a random alphanumeric short code.
///
/// Codes are [`GENERATED_CODE_LENGTH`] characters of `[A-Za-z0-9]`, safe both
/// as a map key and as a URL path segment.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns true if `code` matches the shortcode pattern.
///
/// Does not consult the reserved list.
pub fn is_valid_shortcode(code: &str) -> bool {
    SHORTCODE_REGEX.is_match(code)
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved system code
///
/// # Errors
///
/// Returns [`ShortUrlError::InvalidShortcode`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("my_Link-2024").is_ok());
///
/// assert!(validate_custom_code("ab").is_err());        // Too short
/// assert!(validate_custom_code("has space").is_err()); // Bad characters
/// assert!(validate_custom_code("health").is_err());    // Reserved
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), ShortUrlError> {
    let length = code.chars().count();
    if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
        return Err(ShortUrlError::invalid_shortcode(
            code,
            format!(
                "must be {}-{} characters, got {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH, length
            ),
        ));
    }

    if !is_valid_shortcode(code) {
        return Err(ShortUrlError::invalid_shortcode(
            code,
            "only letters, digits, '_' and '-' are allowed",
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(ShortUrlError::invalid_shortcode(code, "this code is reserved"));
    }

    Ok(())
}
