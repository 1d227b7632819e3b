//! Handler for short URL redirect.

use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Browsers request this on every page load; it is never a short code.
const FAVICON: &str = "favicon.ico";

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `ANY /{code}` (router fallback)
///
/// # Request Flow
///
/// 1. Take the code from the path after the leading `/`
/// 2. Reject the root path and `favicon.ico` without touching the store
/// 3. Resolve the code, then record the click
/// 4. Return 301 Moved Permanently
///
/// `OPTIONS` requests are answered with an empty 200 and never count as clicks.
///
/// # Errors
///
/// Returns 404 Not Found if the code is empty, `favicon.ico`, or unknown.
pub async fn redirect_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, AppError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    let path = uri.path();
    let code = path.strip_prefix('/').unwrap_or(path);

    if code.is_empty() || code == FAVICON {
        return Err(AppError::not_found(
            "404 page not found",
            json!({ "path": path }),
        ));
    }

    let long_url = state.link_service.resolve_and_increment(code).await?;

    let location = HeaderValue::try_from(long_url.as_str()).map_err(|e| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "code": code, "reason": e.to_string() }),
        )
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
