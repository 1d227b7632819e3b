//! Long URL validation and normalization.
//!
//! Accepts loosely typed input such as `example.com/page` and turns it into an
//! absolute URL, defaulting to HTTPS when no scheme was given.

use url::Url;

/// Errors that can occur while validating a long URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {reason}")]
    InvalidFormat { normalized: String, reason: String },
}

/// Validates a candidate long URL and returns its normalized form.
///
/// # Rules
///
/// 1. Leading and trailing whitespace is trimmed
/// 2. An empty string is invalid
/// 3. Input without an `http://` or `https://` prefix gets `https://` prepended
/// 4. Control characters anywhere in the trimmed input are invalid
/// 5. The result must parse as an absolute URL with a host
///
/// The normalized string is the trimmed, prefixed input itself; it is not
/// re-serialized by the parser, so paths and casing are stored as submitted.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input and
/// [`UrlValidationError::InvalidFormat`] when parsing fails.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_url("  example.com/page ").unwrap(), "https://example.com/page");
/// assert!(validate_url("   ").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if contains_control_chars(trimmed) {
        return Err(UrlValidationError::InvalidFormat {
            normalized: trimmed.to_string(),
            reason: "contains control characters".to_string(),
        });
    }

    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    match Url::parse(&normalized) {
        Ok(url) if url.has_host() => Ok(normalized),
        Ok(_) => Err(UrlValidationError::InvalidFormat {
            normalized,
            reason: "missing host".to_string(),
        }),
        Err(e) => Err(UrlValidationError::InvalidFormat {
            normalized,
            reason: e.to_string(),
        }),
    }
}

/// Returns `true` if `url` holds any ASCII control character.
///
/// The parser silently drops tabs and newlines, but such a string can never
/// be sent back as a `Location` header.
pub fn contains_control_chars(url: &str) -> bool {
    url.chars().any(|c| c.is_ascii_control())
}
