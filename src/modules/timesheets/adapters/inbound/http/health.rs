use axum::extract::State;
use serde_json::json;
use tracing::warn;

use crate::shared::infrastructure::http::envelope::ApiResponse;
use crate::shell::state::AppState;

/// Liveness with a storage round trip.
pub async fn check(State(state): State<AppState>) -> ApiResponse {
    match state.service.ping().await {
        Ok(()) => ApiResponse::ok(json!({"status": "ok"}), "Healthy"),
        Err(err) => {
            warn!(error = %err, "health check failed");
            ApiResponse::service_unavailable("DB down")
        }
    }
}
