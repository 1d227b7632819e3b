//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::info;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "long_url": "example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "http://localhost:8080/aB3-x_" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for malformed JSON or an invalid URL
/// - 500 Internal Server Error if the link cannot be stored
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;

    let link = state
        .link_service
        .create_short_link(&payload.long_url)
        .await?;

    info!(code = %link.code, long_url = %link.long_url, "Short link created");

    Ok(Json(ShortenResponse {
        short_url: state.link_service.get_short_url(&link.code),
    }))
}
