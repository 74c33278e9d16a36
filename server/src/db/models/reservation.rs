//! Reservation Model

use serde::{Deserialize, Serialize};

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Booked,
    Seated,
    Cancelled,
}

/// Reservation entity; independent CRUD lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: i64,
    pub table_id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    pub party_size: i64,
    pub reserved_at: String,
    pub status: ReservationStatus,
    pub created_at: String,
}

/// Create reservation payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationCreate {
    pub table_id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    pub party_size: Option<i64>,
    pub reserved_at: String,
}

/// Update reservation payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationUpdate {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub party_size: Option<i64>,
    pub reserved_at: Option<String>,
    pub status: Option<ReservationStatus>,
}
