//! Short code generation.
//!
//! Codes are drawn from the OS random source and encoded as URL-safe base64,
//! so every character is one of `A-Z a-z 0-9 - _`.

use base64::Engine as _;

/// Default number of characters in a generated short code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Shortest code length accepted by the service.
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest code length accepted by the service.
pub const MAX_CODE_LENGTH: usize = 32;

/// Paths served by the router itself, which can never work as short codes.
pub const RESERVED_CODES: &[&str] = &["api", "health", "favicon.ico"];

/// Failure of the system random number generator.
#[derive(Debug, thiserror::Error)]
#[error("Failed to generate random bytes: {0}")]
pub struct CodeGenerationError(#[from] getrandom::Error);

/// Generates a cryptographically secure random short code of exactly `length`
/// characters.
///
/// `length` random bytes are encoded as unpadded URL-safe base64 (which yields
/// at least `length` characters) and the result is truncated.
///
/// # Errors
///
/// Returns [`CodeGenerationError`] if the system random source fails. There is
/// no fallback to a weaker generator.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
/// ```
pub fn generate_code(length: usize) -> Result<String, CodeGenerationError> {
    let mut buffer = vec![0u8; length];

    getrandom::fill(&mut buffer)?;

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buffer);
    code.truncate(length);

    Ok(code)
}

/// Returns `true` if `code` collides with a route the service handles itself.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
