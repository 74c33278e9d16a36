//! Subscription Plan Repository

use super::{RepoError, RepoResult, is_unique_violation};
use crate::db::models::{SubscriptionPlan, SubscriptionPlanCreate, SubscriptionPlanUpdate};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct PlanRepository {
    pool: SqlitePool,
}

impl PlanRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All plans, cheapest first
    pub async fn find_all(&self) -> RepoResult<Vec<SubscriptionPlan>> {
        let plans: Vec<SubscriptionPlan> =
            sqlx::query_as("SELECT * FROM subscription_plan ORDER BY monthly_price")
                .fetch_all(&self.pool)
                .await?;
        Ok(plans)
    }

    /// Plan by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<SubscriptionPlan>> {
        let plan: Option<SubscriptionPlan> =
            sqlx::query_as("SELECT * FROM subscription_plan WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(plan)
    }

    /// Create a plan
    pub async fn create(&self, data: SubscriptionPlanCreate) -> RepoResult<SubscriptionPlan> {
        let plan: SubscriptionPlan = sqlx::query_as(
            "INSERT INTO subscription_plan (name, monthly_price, max_tables) \
             VALUES (?, ?, ?) RETURNING *",
        )
        .bind(data.name.clone())
        .bind(data.monthly_price)
        .bind(data.max_tables)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoError::Duplicate(format!("Plan '{}' already exists", data.name))
            } else {
                RepoError::Database(e)
            }
        })?;
        Ok(plan)
    }

    /// Update a plan
    pub async fn update(&self, id: i64, data: SubscriptionPlanUpdate) -> RepoResult<SubscriptionPlan> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Plan {id}")))?;

        let plan: SubscriptionPlan = sqlx::query_as(
            "UPDATE subscription_plan SET name = ?, monthly_price = ?, max_tables = ?, \
             active = ? WHERE id = ? RETURNING *",
        )
        .bind(data.name.unwrap_or(existing.name))
        .bind(data.monthly_price.unwrap_or(existing.monthly_price))
        .bind(data.max_tables.unwrap_or(existing.max_tables))
        .bind(data.active.unwrap_or(existing.active))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(plan)
    }

    /// Hard delete a plan
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM subscription_plan WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
