//! Waiter Call Repository

use super::RepoResult;
use crate::db::models::{WaiterCall, WaiterCallCreate};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct WaiterCallRepository {
    pool: SqlitePool,
}

impl WaiterCallRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Unresolved calls, oldest first
    pub async fn list_open(&self) -> RepoResult<Vec<WaiterCall>> {
        let calls: Vec<WaiterCall> =
            sqlx::query_as("SELECT * FROM waiter_call WHERE resolved = 0 ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;
        Ok(calls)
    }

    /// Create a new call
    pub async fn create(&self, data: WaiterCallCreate) -> RepoResult<WaiterCall> {
        let call: WaiterCall = sqlx::query_as(
            "INSERT INTO waiter_call (table_id, reason) VALUES (?, ?) RETURNING *",
        )
        .bind(data.table_id)
        .bind(data.reason)
        .fetch_one(&self.pool)
        .await?;
        Ok(call)
    }

    /// Mark a call resolved
    ///
    /// Returns None when the call does not exist; resolving an unknown call
    /// is treated as a no-op by the boundary.
    pub async fn resolve(&self, id: i64) -> RepoResult<Option<WaiterCall>> {
        let call: Option<WaiterCall> =
            sqlx::query_as("UPDATE waiter_call SET resolved = 1 WHERE id = ? RETURNING *")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(call)
    }
}
