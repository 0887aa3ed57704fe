use axum::Json;

use crate::models::{HealthResponse, ReadinessResponse};

/// Handler for GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handler for GET /api/readiness
///
/// The tables live in process memory, so once the router serves requests
/// the store is reachable.
pub async fn readiness() -> Json<ReadinessResponse> {
    Json(ReadinessResponse::ready())
}
