//! Response body of `GET /health`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseCheck,
}

/// Outcome of the storage probe.
#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub reachable: bool,

    /// Stored links, reported only when the store answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatabaseCheck {
    pub fn up(links: i64) -> Self {
        Self {
            reachable: true,
            links: Some(links),
            error: None,
        }
    }

    pub fn down(error: impl Into<String>) -> Self {
        Self {
            reachable: false,
            links: None,
            error: Some(error.into()),
        }
    }
}
