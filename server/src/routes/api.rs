use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// The only JSON route; everything else is static hosting.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.datasets.as_ref() {
        Ok(counts) => Json(serde_json::json!({
            "status": "ok",
            "monasteries": counts.monasteries,
            "scenes": counts.scenes,
            "events": counts.events,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "bundled dataset failed to load");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "error",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
