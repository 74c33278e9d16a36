//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::db::repository::DiningTableRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "table";

/// GET /api/tables - all tables ordered by number
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = DiningTableRepository::new(state.db.pool.clone())
        .find_all()
        .await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = DiningTableRepository::new(state.db.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id}")))?;
    Ok(Json(table))
}

/// GET /api/tables/qr/:token - customer entry point after scanning the code
pub async fn get_by_qr_token(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let table = DiningTableRepository::new(state.db.pool.clone())
        .find_by_qr_token(&token)
        .await?
        .ok_or_else(|| AppError::not_found("Table for that code"))?;
    Ok(Json(table))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    let table = DiningTableRepository::new(state.db.pool.clone())
        .create(payload)
        .await?;
    state.broadcast_sync(RESOURCE, "created", table.id, Some(&table));
    Ok(Json(table))
}

/// PUT /api/tables/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let table = DiningTableRepository::new(state.db.pool.clone())
        .update(id, payload)
        .await?;
    state.broadcast_sync(RESOURCE, "updated", id, Some(&table));
    Ok(Json(table))
}

/// DELETE /api/tables/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = DiningTableRepository::new(state.db.pool.clone())
        .delete(id)
        .await?;
    if deleted {
        state.broadcast_sync::<()>(RESOURCE, "deleted", id, None);
    }
    Ok(Json(deleted))
}
