//! Health probes.

use axum::{extract::State, http::StatusCode, Json};
use tipjar_service::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// `GET /health`: liveness, answers as long as the process is up.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// `GET /health/ready`: probes both stores concurrently and answers 503
/// while either is unreachable.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();
    let (db, redis) = tokio::join!(ctx.pool().acquire(), ctx.redis_pool().ping());

    let response = ReadinessResponse::ready(db.is_ok(), redis.is_ok());
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
