//! API Handlers
//!
//! HTTP request handlers for the item endpoints, plus health and cache
//! statistics.
//!
//! Reads of a single item go through the item cache. Every mutation goes to
//! the item store and invalidates the cached snapshot both before and after
//! the write.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::api::{AppState, AuthUser};
use crate::cache::CacheStats;
use crate::error::{ApiError, Result};
use crate::models::{
    CreateItemRequest, HealthResponse, Item, ItemId, MessageResponse, UpdateItemRequest,
};

/// Parses the `{id}` path segment. Only plain digit strings are ids; anything
/// else (signs included) names no item, so it is a 404 rather than a 400.
fn parse_item_id(raw: &str) -> Result<ItemId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::item_not_found());
    }
    raw.parse::<ItemId>().map_err(|_| ApiError::item_not_found())
}

/// Handler for POST /items
pub async fn create_item_handler(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    body: std::result::Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>)> {
    let Json(req) = body?;
    let new_item = req.validate()?;

    let item = state.items.create(new_item).await?;
    info!(item_id = item.id, user = %claims.username, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /items/all
///
/// Always served from the store.
pub async fn list_items_handler(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
) -> Result<Json<Vec<Item>>> {
    let items = state.items.find_all().await?;
    Ok(Json(items))
}

/// Handler for GET /items/:id
pub async fn get_item_handler(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Item>> {
    let id = parse_item_id(&raw_id)?;
    let item = state.cache.get(id).await?;
    debug!(item_id = id, "Item fetched");
    Ok(Json(item))
}

/// Handler for PUT /items/:id/update
///
/// Partial update: fields absent from the body keep their stored values.
pub async fn update_item_handler(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(raw_id): Path<String>,
    body: std::result::Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<Item>> {
    let id = parse_item_id(&raw_id)?;
    let mut item = state
        .items
        .find_by_id(id)
        .await?
        .ok_or_else(ApiError::item_not_found)?;

    let Json(req) = body?;
    req.apply(&mut item)?;

    state.cache.invalidate(id).await;
    let saved = state.items.save(item).await;
    state.cache.invalidate(id).await;

    let item = saved?;
    info!(item_id = id, user = %claims.username, "Item updated");
    Ok(Json(item))
}

/// Handler for DELETE /items/:id/delete
pub async fn delete_item_handler(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_item_id(&raw_id)?;

    state.cache.invalidate(id).await;
    let deleted = state.items.delete(id).await;
    state.cache.invalidate(id).await;

    if !deleted? {
        return Err(ApiError::item_not_found());
    }

    info!(item_id = id, user = %claims.username, "Item deleted");
    Ok(Json(MessageResponse::new("Item deleted successfully")))
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
