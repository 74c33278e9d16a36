//! Unified error codes for the Comanda platform
//!
//! Error codes are shared between the server and terminal clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order item not found
    OrderItemNotFound = 4002,
    /// Operation not permitted in the order's current status
    InvalidOrderState = 4003,
    /// Order has no billable items
    EmptyOrder = 4004,
    /// Order item can no longer be cancelled
    ItemNotCancellable = 4005,

    // ==================== 5xxx: Payment ====================
    /// Payment not found
    PaymentNotFound = 5001,
    /// Bill share not found
    ShareNotFound = 5002,
    /// Share amounts do not add up to the order total
    ShareAmountMismatch = 5003,
    /// Order already has a payment
    PaymentAlreadyExists = 5004,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,

    // ==================== 7xxx: Table ====================
    /// Dining table not found
    TableNotFound = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database operation failed
    DatabaseError = 9002,
    /// Stored data violates an expected back-reference
    IntegrityError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::OrderNotFound => "Order not found",
            Self::OrderItemNotFound => "Order item not found",
            Self::InvalidOrderState => "Operation not permitted in current order status",
            Self::EmptyOrder => "Order has no billable items",
            Self::ItemNotCancellable => "Order item is already being prepared or delivered",

            Self::PaymentNotFound => "Payment not found",
            Self::ShareNotFound => "Bill share not found",
            Self::ShareAmountMismatch => "Share amounts do not match the order total",
            Self::PaymentAlreadyExists => "Order already has a payment",

            Self::MenuItemNotFound => "Menu item not found",

            Self::TableNotFound => "Dining table not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database operation failed",
            Self::IntegrityError => "Data integrity violation",
        }
    }

    /// Get the HTTP status code for this error code
    pub fn http_status(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::OrderNotFound
            | Self::OrderItemNotFound
            | Self::PaymentNotFound
            | Self::ShareNotFound
            | Self::MenuItemNotFound
            | Self::TableNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists | Self::PaymentAlreadyExists => StatusCode::CONFLICT,

            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidOrderState
            | Self::EmptyOrder
            | Self::ItemNotCancellable
            | Self::ShareAmountMismatch => StatusCode::BAD_REQUEST,

            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::IntegrityError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the category for this error code
    pub fn category(&self) -> super::category::ErrorCategory {
        super::category::ErrorCategory::from_code(self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            4001 => Ok(Self::OrderNotFound),
            4002 => Ok(Self::OrderItemNotFound),
            4003 => Ok(Self::InvalidOrderState),
            4004 => Ok(Self::EmptyOrder),
            4005 => Ok(Self::ItemNotCancellable),
            5001 => Ok(Self::PaymentNotFound),
            5002 => Ok(Self::ShareNotFound),
            5003 => Ok(Self::ShareAmountMismatch),
            5004 => Ok(Self::PaymentAlreadyExists),
            6001 => Ok(Self::MenuItemNotFound),
            7001 => Ok(Self::TableNotFound),
            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::DatabaseError),
            9003 => Ok(Self::IntegrityError),
            _ => Err(format!("Unknown error code: {}", value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::OrderNotFound,
            ErrorCode::ShareAmountMismatch,
            ErrorCode::IntegrityError,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value).unwrap(), code);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(ErrorCode::try_from(1234).is_err());
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            ErrorCode::OrderNotFound.http_status(),
            http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::ShareAmountMismatch.http_status(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::IntegrityError.http_status(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
