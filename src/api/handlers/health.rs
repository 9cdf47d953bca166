//! Health check endpoint for liveness probes

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status (always "ok" when responding)
    pub status: String,
}

/// Health check endpoint
///
/// Returns 200 OK while the listener is serving. Collaborator backends are
/// not probed.
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse { status: "ok".to_string() }))
}
