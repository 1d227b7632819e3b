//! Handler for short code expansion endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::expand::{ExpandRequest, ExpandResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the long URL and click count behind a short code.
///
/// # Endpoint
///
/// `POST /api/expand`
///
/// # Request Body
///
/// ```json
/// { "short_code": "aB3-x_" }
/// ```
///
/// # Response
///
/// ```json
/// { "long_url": "https://example.com/page", "click_count": 3 }
/// ```
///
/// Expanding does not count as a click.
///
/// # Errors
///
/// - 400 Bad Request for malformed JSON or a blank short code
/// - 404 Not Found if the code is unknown
pub async fn expand_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExpandRequest>, JsonRejection>,
) -> Result<Json<ExpandResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .resolve(payload.short_code.trim())
        .await?;

    Ok(Json(ExpandResponse {
        long_url: link.long_url,
        click_count: link.click_count,
    }))
}
