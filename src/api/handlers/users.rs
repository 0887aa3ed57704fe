//! User handlers
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
use crate::models::{User, UserPayload};
use crate::services::users;

/// Handler for GET /api/user
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<PublicCached> {
    let key = list_key(Entity::User, query.key_params());
    let max_age = state.cache.default_ttl();

    if let Some(cached) = state.cache.get(&key).await {
        return Ok(PublicCached::new(cached, max_age));
    }

    let page = users::list(&state.db, query.pagination()).await;
    let body = to_body(&page)?;
    state.cache.set(key, body.clone(), None).await;
    Ok(PublicCached::new(body, max_age))
}

/// Handler for GET /api/user/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<PublicCached> {
    let key = item_key(Entity::User, &id);
    let max_age = state.cache.default_ttl();

    if let Some(cached) = state.cache.get(&key).await {
        return Ok(PublicCached::new(cached, max_age));
    }

    let user = users::get(&state.db, &id).await?;
    let body = to_body(&user)?;
    state.cache.set(key, body.clone(), None).await;
    Ok(PublicCached::new(body, max_age))
}

/// Handler for POST /api/user
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(payload) = payload?;
    let created = users::create(&state.db, payload).await?;
    state
        .cache
        .invalidate(Entity::User, created.id.to_string())
        .await;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for PUT /api/user/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(payload) = payload?;
    let updated = users::update(&state.db, &id, payload).await?;
    state
        .cache
        .invalidate(Entity::User, updated.id.to_string())
        .await;
    Ok(Json(updated))
}

/// Handler for DELETE /api/user/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    users::remove(&state.db, &id).await;
    state.cache.invalidate(Entity::User, &id).await;
    StatusCode::NO_CONTENT
}
