//! Liveness endpoint.

use axum::Json;
use axum::extract::State;

use crate::protocol::HealthResponse;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_s: state.uptime_s(),
        cache_backend: state.service().cache_backend().to_string(),
        environment: state.config().environment.as_str().to_string(),
    })
}
