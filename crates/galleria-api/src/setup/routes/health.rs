//! Health check handler and response type.

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"alive"` while the process serves requests
    pub status: String,
    /// Whether an image store is configured
    pub uploads_enabled: bool,
}

/// Liveness probe. Does not contact the image store.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive".to_string(),
        uploads_enabled: state.gatekeeper.is_enabled(),
    })
}
