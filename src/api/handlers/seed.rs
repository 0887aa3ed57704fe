use axum::{extract::State, http::StatusCode, Json};

use crate::api::AppState;
use crate::cache::{list_prefix, Entity};
use crate::error::Result;
use crate::models::SeedResponse;
use crate::services;

/// Handler for POST /api/seed
///
/// Cached list pages of every entity are dropped, since all of them grew.
pub async fn seed(State(state): State<AppState>) -> Result<(StatusCode, Json<SeedResponse>)> {
    let response = services::seed::seed(&state.db).await?;

    for entity in [Entity::Organization, Entity::User, Entity::Order] {
        state.cache.delete_by_prefix(&list_prefix(entity)).await;
    }

    Ok((StatusCode::CREATED, Json(response)))
}
