//! Repository layer
//!
//! Typed CRUD and query operations over the relational store. No business
//! logic beyond constraint enforcement; the engines own lifecycle rules and
//! run their multi-statement mutations inside transactions.

mod dining_table;
mod menu_item;
mod order;
mod payment;
mod plan;
mod reservation;
mod review;
mod waiter_call;

pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use plan::PlanRepository;
pub use reservation::ReservationRepository;
pub use review::ReviewRepository;
pub use waiter_call::WaiterCallRepository;

use thiserror::Error;

/// Repository error
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// True when the underlying sqlx error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}
