use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::api_state::ApiState;

/// Readiness probe: returns 200 if both storage tiers answer, else 503.
pub async fn ready(State(state): State<ApiState>) -> impl IntoResponse {
    let db_ok = state.db.client.query("RETURN true").await.is_ok();
    let storage_ok = state.storage.exists("drafts/.probe").await.is_ok();

    if db_ok && storage_ok {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "checks": { "db": "ok", "storage": "ok" }
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "error",
                "checks": {
                    "db": if db_ok { "ok" } else { "fail" },
                    "storage": if storage_ok { "ok" } else { "fail" }
                }
            })),
        )
    }
}
