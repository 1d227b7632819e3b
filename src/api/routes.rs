//! API route configuration.

use crate::api::handlers::{
    expand_handler, method_not_allowed_handler, preflight_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{Router, routing::post};

/// JSON API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short URL
/// - `POST /expand`  - Look up the long URL and click count of a code
///
/// `OPTIONS` is answered with an empty 200; any other method gets 405.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shorten",
            post(shorten_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/expand",
            post(expand_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
}
