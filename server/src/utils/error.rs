//! Error conversions at the storage boundary
//!
//! [`AppError`] lives in `shared`; the store-level [`RepoError`] and raw
//! `sqlx::Error` are translated here so engines and handlers can use `?`.

use crate::db::repository::RepoError;
use shared::error::AppError;

/// Translate a raw sqlx error into a system-level [`AppError`]
///
/// Used where engines run their own queries instead of going through a
/// repository. Driver details are logged, not sent to clients.
pub(crate) fn sqlx_err(e: sqlx::Error) -> AppError {
    tracing::error!(error = %e, "Database operation failed");
    AppError::database("Database operation failed")
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(what) => AppError::not_found(what),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(e) => sqlx_err(e),
        }
    }
}
