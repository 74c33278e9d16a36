//! Shared utilities
//!
//! Error types re-exported from `shared::error` plus the conversions that
//! bridge storage errors into them, and logging setup.

pub mod error;
pub mod logger;

pub use shared::error::{ApiError, AppError, AppResult, ErrorCategory, ErrorCode};
