//! Unified error handling
//!
//! - [`ErrorCode`] — numeric, categorized error codes shared with terminals
//! - [`AppError`] — the application error type carried through every layer
//! - [`ApiError`] — the `{error}` envelope returned to clients

pub mod category;
pub mod codes;
pub mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{ApiError, AppError, AppResult};
