//! Liveness endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{DatabaseCheck, HealthResponse};
use crate::state::AppState;

/// `GET /health`: 200 when the store answers, 503 otherwise.
///
/// ```json
/// { "status": "healthy", "version": "0.1.0", "database": { "reachable": true, "links": 42 } }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = probe_database(&state).await;

    let (code, status) = if database.reachable {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
    };

    (code, Json(body))
}

async fn probe_database(state: &AppState) -> DatabaseCheck {
    let service = &state.link_service;

    let probe = match service.health_check().await {
        Ok(()) => service.summary().await,
        Err(e) => Err(e),
    };

    match probe {
        Ok(summary) => DatabaseCheck::up(summary.total_links),
        Err(e) => {
            tracing::warn!(error = %e, details = %e.details(), "Health check failed");
            DatabaseCheck::down(e.to_string())
        }
    }
}
