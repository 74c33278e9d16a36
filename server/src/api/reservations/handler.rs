//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Reservation, ReservationCreate, ReservationUpdate};
use crate::db::repository::ReservationRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "reservation";

/// GET /api/reservations - all reservations, soonest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = ReservationRepository::new(state.db.pool.clone())
        .find_all()
        .await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = ReservationRepository::new(state.db.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {id}")))?;
    Ok(Json(reservation))
}

/// POST /api/reservations
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    if payload.customer_name.trim().is_empty() {
        return Err(AppError::validation("Customer name is required"));
    }
    let reservation = ReservationRepository::new(state.db.pool.clone())
        .create(payload)
        .await?;
    state.broadcast_sync(RESOURCE, "created", reservation.id, Some(&reservation));
    Ok(Json(reservation))
}

/// PUT /api/reservations/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let reservation = ReservationRepository::new(state.db.pool.clone())
        .update(id, payload)
        .await?;
    state.broadcast_sync(RESOURCE, "updated", id, Some(&reservation));
    Ok(Json(reservation))
}

/// DELETE /api/reservations/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = ReservationRepository::new(state.db.pool.clone())
        .delete(id)
        .await?;
    if deleted {
        state.broadcast_sync::<()>(RESOURCE, "deleted", id, None);
    }
    Ok(Json(deleted))
}
