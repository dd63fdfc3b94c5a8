use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use std::time::Instant;

use crate::handlers::AppState;

/// Basic liveness probe - just checks if the service is running
async fn liveness_check() -> impl IntoResponse {
    Json(json!({
        "status": "up",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Readiness probe - checks if the service is ready to handle traffic
async fn readiness_check(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();

    let db_check_start = Instant::now();
    let db_result = crate::db::check_connection(&state.db).await;
    let db_latency = db_check_start.elapsed().as_millis() as u64;

    if db_result.is_ok() {
        Ok((
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": {
                    "database": {
                        "status": "up",
                        "latency_ms": db_latency
                    }
                },
                "response_time_ms": start.elapsed().as_millis()
            })),
        ))
    } else {
        Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "checks": {
                    "database": {
                        "status": "down",
                        "error": db_result.err().map(|e| e.to_string())
                    }
                },
                "response_time_ms": start.elapsed().as_millis()
            })),
        ))
    }
}

/// Creates the router for health check endpoints
///
/// Endpoints:
/// - GET /health       - Basic liveness probe
/// - GET /health/ready - Readiness probe (checks database connectivity)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness_check))
        .route("/ready", get(readiness_check))
}
