//! Waiter Call API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{WaiterCall, WaiterCallCreate};
use crate::db::repository::WaiterCallRepository;
use crate::utils::AppResult;

const RESOURCE: &str = "waiter_call";

/// GET /api/waiter-calls - unresolved calls, oldest first
pub async fn list_open(State(state): State<ServerState>) -> AppResult<Json<Vec<WaiterCall>>> {
    let calls = WaiterCallRepository::new(state.db.pool.clone())
        .list_open()
        .await?;
    Ok(Json(calls))
}

/// POST /api/waiter-calls - customer asks for staff
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<WaiterCallCreate>,
) -> AppResult<Json<WaiterCall>> {
    let call = WaiterCallRepository::new(state.db.pool.clone())
        .create(payload)
        .await?;
    state.broadcast_sync(RESOURCE, "created", call.id, Some(&call));
    Ok(Json(call))
}

/// POST /api/waiter-calls/:id/resolve
///
/// Resolving an unknown call is a no-op, not an error: two waiters may race
/// to clear the same notification.
pub async fn resolve(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<WaiterCall>>> {
    let call = WaiterCallRepository::new(state.db.pool.clone())
        .resolve(id)
        .await?;
    if let Some(call) = &call {
        state.broadcast_sync(RESOURCE, "updated", call.id, Some(call));
    }
    Ok(Json(call))
}
