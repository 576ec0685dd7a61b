use axum::{Json, extract::State};
use serde::Serialize;

use crate::router::GatewayState;

#[derive(Debug, Serialize)]
pub struct HealthResp {
    pub status: &'static str,
    pub backend: &'static str,
}

/// GET /api/health. Reports configuration only; the backend is not contacted.
pub async fn health(State(state): State<GatewayState>) -> Json<HealthResp> {
    let backend = if state.config.backend.is_live() {
        "live"
    } else {
        "unconfigured"
    };
    Json(HealthResp {
        status: "ok",
        backend,
    })
}
