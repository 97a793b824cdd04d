use axum::{extract::State, http::StatusCode, response::Response};
use serde_json::json;

use crate::app::AppState;

/// GET /health - liveness only, touches neither store nor notifier
pub async fn health(State(state): State<AppState>) -> Response {
    state.responses.json(
        StatusCode::OK,
        json!({
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }),
    )
}
