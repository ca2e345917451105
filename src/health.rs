use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    credential: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let credential = if state.pipeline.translator().has_credential() {
        info!("Health check passed");
        "configured"
    } else {
        warn!("Health check: no API key configured, translations will fail");
        "missing"
    };
    Json(HealthResponse {
        status: "OK".to_string(),
        credential: credential.to_string(),
    })
}
