//! Health check endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness response body.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status, always `"ok"` while the process is serving.
    pub status: &'static str,
    /// Crate version baked in at compile time.
    pub version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the health route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
