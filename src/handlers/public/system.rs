// handlers/public/system.rs - GET /ping and GET /health handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::middleware::ApiResponse;
use crate::state::AppState;

/// GET /ping - Liveness check
pub async fn ping() -> ApiResponse<&'static str> {
    ApiResponse::success("pong")
}

/// GET /health - Readiness check including the store
pub async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "environment": state.config.environment,
            "version": env!("CARGO_PKG_VERSION"),
            "database": "ok"
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
                .into_response()
        }
    }
}
