//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

fn status(ok: bool, up: &str, down: &str) -> String {
    if ok { up } else { down }.to_string()
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = state.db.health_check().await.unwrap_or_else(|e| {
        warn!(error = %e, "Database health check failed");
        false
    });
    let storage = state.blobs.health_check().await.unwrap_or_else(|e| {
        warn!(error = %e, "Storage health check failed");
        false
    });

    Json(ApiResponse::ok(HealthResponse {
        status: status(database && storage, "ok", "degraded"),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: status(database, "connected", "unavailable"),
        storage: status(storage, "available", "unavailable"),
    }))
}
