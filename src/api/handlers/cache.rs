use axum::{extract::State, Json};

use crate::api::AppState;
use crate::models::CacheStatsResponse;

/// Handler for GET /api/cache/stats
pub async fn stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(state.cache.stats().await.into())
}
