//! DTOs for short code expansion endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to look up the long URL behind a short code.
#[derive(Debug, Deserialize, Validate)]
pub struct ExpandRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub short_code: String,
}

/// Long URL and click statistics for a short code.
#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub long_url: String,
    pub click_count: i64,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Short code cannot be empty".into()));
    }
    Ok(())
}
