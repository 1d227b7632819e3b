//! Fallback handlers shared by the API routes.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::error::AppError;

/// Answers `OPTIONS` with an empty 200 so browsers can complete pre-flight.
///
/// CORS headers are added by [`crate::api::middleware::cors`].
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Rejects any method a route does not serve with 405.
pub async fn method_not_allowed_handler(method: Method) -> AppError {
    AppError::method_not_allowed(
        "Method not allowed",
        json!({ "method": method.as_str() }),
    )
}
