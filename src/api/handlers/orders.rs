//! Order handlers
//!
//! Reads carry an `ETag` and honor `If-None-Match`, answering `304 Not
//! Modified` when the client already holds the current representation.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use super::to_body;
use crate::api::extract::{if_none_match, OrderListQuery};
use crate::api::AppState;
use crate::cache::{item_key, list_key, respond_cached_or_fresh, ConditionalResponse, Entity};
use crate::error::Result;
use crate::models::{Order, OrderPayload};
use crate::services::orders;

/// Handler for GET /api/order
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
    headers: HeaderMap,
) -> Result<ConditionalResponse> {
    let key = list_key(Entity::Order, query.key_params());
    let if_none_match = if_none_match(&headers);

    if let Some(cached) = state.cache.get(&key).await {
        return Ok(respond_cached_or_fresh(if_none_match, cached));
    }

    let page = orders::list(
        &state.db,
        query.pagination(),
        query.user_id(),
        query.organization_id(),
    )
    .await;
    Ok(state
        .cache
        .populate_and_respond(key, to_body(&page)?, if_none_match)
        .await)
}

/// Handler for GET /api/order/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<ConditionalResponse> {
    let key = item_key(Entity::Order, &id);
    let if_none_match = if_none_match(&headers);

    if let Some(cached) = state.cache.get(&key).await {
        return Ok(respond_cached_or_fresh(if_none_match, cached));
    }

    let detail = orders::get(&state.db, &id).await?;
    Ok(state
        .cache
        .populate_and_respond(key, to_body(&detail)?, if_none_match)
        .await)
}

/// Handler for POST /api/order
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<OrderPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>)> {
    let Json(payload) = payload?;
    let created = orders::create(&state.db, payload).await?;
    state
        .cache
        .invalidate(Entity::Order, created.id.to_string())
        .await;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for PUT /api/order/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<OrderPayload>, JsonRejection>,
) -> Result<Json<Order>> {
    let Json(payload) = payload?;
    let updated = orders::update(&state.db, &id, payload).await?;
    state
        .cache
        .invalidate(Entity::Order, updated.id.to_string())
        .await;
    Ok(Json(updated))
}

/// Handler for DELETE /api/order/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    orders::remove(&state.db, &id).await;
    state.cache.invalidate(Entity::Order, &id).await;
    StatusCode::NO_CONTENT
}
