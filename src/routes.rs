//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /api/shorten` - Create a short URL
//! - `POST /api/expand`  - Expand a short code
//! - `GET  /health`      - Health check
//! - `ANY  /{code}`      - Short link redirect (router fallback)
//!
//! # Middleware
//!
//! - **CORS** - Wildcard CORS headers on every response
//! - **Tracing** - Structured request/response logging

use crate::api;
use crate::api::handlers::{health_handler, preflight_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// Everything that is not an API or health route is treated as a short code,
/// whatever the method.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler).options(preflight_handler))
        .nest("/api", api::routes::routes())
        .fallback(redirect_handler)
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}
