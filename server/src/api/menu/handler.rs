//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "menu_item";

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// When true, only items currently offered to customers
    #[serde(default)]
    pub available: bool,
}

/// GET /api/menu - full menu, optionally filtered to available items
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.pool.clone());
    let items = if query.available {
        repo.find_available().await?
    } else {
        repo.find_all().await?
    };
    Ok(Json(items))
}

/// GET /api/menu/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = MenuItemRepository::new(state.db.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id}")))?;
    Ok(Json(item))
}

/// POST /api/menu
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    if payload.price <= 0.0 || !payload.price.is_finite() {
        return Err(AppError::validation("Price must be a positive number"));
    }
    let item = MenuItemRepository::new(state.db.pool.clone())
        .create(payload)
        .await?;
    state.broadcast_sync(RESOURCE, "created", item.id, Some(&item));
    Ok(Json(item))
}

/// PUT /api/menu/:id
///
/// Price edits only affect future orders; placed items keep their snapshot.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(price) = payload.price
        && (price <= 0.0 || !price.is_finite())
    {
        return Err(AppError::validation("Price must be a positive number"));
    }
    let item = MenuItemRepository::new(state.db.pool.clone())
        .update(id, payload)
        .await?;
    state.broadcast_sync(RESOURCE, "updated", id, Some(&item));
    Ok(Json(item))
}

/// DELETE /api/menu/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = MenuItemRepository::new(state.db.pool.clone())
        .delete(id)
        .await?;
    if deleted {
        state.broadcast_sync::<()>(RESOURCE, "deleted", id, None);
    }
    Ok(Json(deleted))
}
