//! Organization handlers
//!
//! Reads are served from the response cache with a public `Cache-Control`.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use super::to_body;
use crate::api::extract::ListQuery;
use crate::api::AppState;
use crate::cache::{item_key, list_key, Entity, PublicCached};
use crate::error::Result;
use crate::models::{Organization, OrganizationPayload};
use crate::services::organizations;

/// Handler for GET /api/organization
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<PublicCached> {
    let key = list_key(Entity::Organization, query.key_params());
    let max_age = state.cache.default_ttl();

    if let Some(cached) = state.cache.get(&key).await {
        return Ok(PublicCached::new(cached, max_age));
    }

    let page = organizations::list(&state.db, query.pagination()).await;
    let body = to_body(&page)?;
    state.cache.set(key, body.clone(), None).await;
    Ok(PublicCached::new(body, max_age))
}

/// Handler for GET /api/organization/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<PublicCached> {
    let key = item_key(Entity::Organization, &id);
    let max_age = state.cache.default_ttl();

    if let Some(cached) = state.cache.get(&key).await {
        return Ok(PublicCached::new(cached, max_age));
    }

    let organization = organizations::get(&state.db, &id).await?;
    let body = to_body(&organization)?;
    state.cache.set(key, body.clone(), None).await;
    Ok(PublicCached::new(body, max_age))
}

/// Handler for POST /api/organization
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<OrganizationPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Organization>)> {
    let Json(payload) = payload?;
    let created = organizations::create(&state.db, payload).await?;
    state
        .cache
        .invalidate(Entity::Organization, created.id.to_string())
        .await;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for PUT /api/organization/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<OrganizationPayload>, JsonRejection>,
) -> Result<Json<Organization>> {
    let Json(payload) = payload?;
    let updated = organizations::update(&state.db, &id, payload).await?;
    state
        .cache
        .invalidate(Entity::Organization, updated.id.to_string())
        .await;
    Ok(Json(updated))
}

/// Handler for DELETE /api/organization/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    organizations::remove(&state.db, &id).await;
    state.cache.invalidate(Entity::Organization, &id).await;
    StatusCode::NO_CONTENT
}
