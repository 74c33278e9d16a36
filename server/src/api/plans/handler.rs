//! Subscription Plan API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{SubscriptionPlan, SubscriptionPlanCreate, SubscriptionPlanUpdate};
use crate::db::repository::PlanRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "plan";

/// GET /api/plans - all plans, cheapest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SubscriptionPlan>>> {
    let plans = PlanRepository::new(state.db.pool.clone()).find_all().await?;
    Ok(Json(plans))
}

/// GET /api/plans/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SubscriptionPlan>> {
    let plan = PlanRepository::new(state.db.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Plan {id}")))?;
    Ok(Json(plan))
}

/// POST /api/plans
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SubscriptionPlanCreate>,
) -> AppResult<Json<SubscriptionPlan>> {
    let plan = PlanRepository::new(state.db.pool.clone())
        .create(payload)
        .await?;
    state.broadcast_sync(RESOURCE, "created", plan.id, Some(&plan));
    Ok(Json(plan))
}

/// PUT /api/plans/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SubscriptionPlanUpdate>,
) -> AppResult<Json<SubscriptionPlan>> {
    let plan = PlanRepository::new(state.db.pool.clone())
        .update(id, payload)
        .await?;
    state.broadcast_sync(RESOURCE, "updated", id, Some(&plan));
    Ok(Json(plan))
}

/// DELETE /api/plans/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = PlanRepository::new(state.db.pool.clone()).delete(id).await?;
    if deleted {
        state.broadcast_sync::<()>(RESOURCE, "deleted", id, None);
    }
    Ok(Json(deleted))
}
