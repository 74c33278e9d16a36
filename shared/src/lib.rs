//! Shared types for the Comanda platform
//!
//! Types used by both the operations server and connected staff terminals:
//! unified error codes, the broadcast message envelope, and small utilities.

pub mod error;
pub mod message;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiError, AppError, AppResult, ErrorCategory, ErrorCode};
pub use message::{BusMessage, EventType};
