//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};

/// Request to shorten a single URL.
///
/// A missing field deserializes as an empty string and is rejected by the
/// URL validator rather than by the JSON parser.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The URL to shorten. The scheme may be omitted; `https://` is assumed.
    #[serde(default)]
    pub long_url: String,
}

/// Response carrying the fully-qualified short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}
