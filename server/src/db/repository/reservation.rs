//! Reservation Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Reservation, ReservationCreate, ReservationUpdate};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All reservations, soonest first
    pub async fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> =
            sqlx::query_as("SELECT * FROM reservation ORDER BY reserved_at")
                .fetch_all(&self.pool)
                .await?;
        Ok(reservations)
    }

    /// Reservation by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Reservation>> {
        let reservation: Option<Reservation> =
            sqlx::query_as("SELECT * FROM reservation WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(reservation)
    }

    /// Create a reservation
    pub async fn create(&self, data: ReservationCreate) -> RepoResult<Reservation> {
        let reservation: Reservation = sqlx::query_as(
            "INSERT INTO reservation (table_id, customer_name, phone, party_size, reserved_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(data.table_id)
        .bind(data.customer_name)
        .bind(data.phone)
        .bind(data.party_size.unwrap_or(2))
        .bind(data.reserved_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(reservation)
    }

    /// Update a reservation
    pub async fn update(&self, id: i64, data: ReservationUpdate) -> RepoResult<Reservation> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {id}")))?;

        let reservation: Reservation = sqlx::query_as(
            "UPDATE reservation SET customer_name = ?, phone = ?, party_size = ?, \
             reserved_at = ?, status = ? WHERE id = ? RETURNING *",
        )
        .bind(data.customer_name.unwrap_or(existing.customer_name))
        .bind(data.phone.or(existing.phone))
        .bind(data.party_size.unwrap_or(existing.party_size))
        .bind(data.reserved_at.unwrap_or(existing.reserved_at))
        .bind(data.status.unwrap_or(existing.status))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(reservation)
    }

    /// Hard delete a reservation
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM reservation WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
