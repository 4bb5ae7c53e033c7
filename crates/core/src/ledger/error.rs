//! Ledger error types for validation and state errors.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during project ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Payment amount must be greater than zero.
    #[error("Payment amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),

    /// Total fee cannot be negative.
    #[error("Total fee cannot be negative, got {0}")]
    NegativeFee(Decimal),

    /// Amount has more than two decimal places.
    #[error("Amount {0} exceeds the 2 decimal place money scale")]
    InvalidScale(Decimal),

    /// Payment mode outside the enumerated set.
    #[error("Invalid payment mode: {0}")]
    InvalidMode(String),

    // ========== Lookup Errors ==========
    /// Payment not found, or it belongs to a different project.
    #[error("Payment not found: {0}")]
    PaymentNotFound(Uuid),

    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    // ========== Concurrency Errors ==========
    /// Concurrent mutation detected by the storage layer.
    #[error("Concurrent modification detected, please retry")]
    Conflict,

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) | Self::NegativeFee(_) | Self::InvalidScale(_) => {
                "INVALID_AMOUNT"
            }
            Self::InvalidMode(_) => "INVALID_MODE",
            Self::PaymentNotFound(_) => "PAYMENT_NOT_FOUND",
            Self::ProjectNotFound(_) => "PROJECT_NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidAmount(_)
            | Self::NegativeFee(_)
            | Self::InvalidScale(_)
            | Self::InvalidMode(_) => 400,

            // 404 Not Found
            Self::PaymentNotFound(_) | Self::ProjectNotFound(_) => 404,

            // 409 Conflict - concurrency errors
            Self::Conflict => 409,

            // 500 Internal Server Error
            Self::Database(_) => 500,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::InvalidAmount(dec!(-5)).error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(
            LedgerError::NegativeFee(dec!(-1)).error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(
            LedgerError::InvalidScale(dec!(1.999)).error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(
            LedgerError::InvalidMode("wire".into()).error_code(),
            "INVALID_MODE"
        );
        assert_eq!(
            LedgerError::PaymentNotFound(Uuid::nil()).error_code(),
            "PAYMENT_NOT_FOUND"
        );
        assert_eq!(LedgerError::Conflict.error_code(), "CONFLICT");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::InvalidAmount(dec!(0)).http_status_code(), 400);
        assert_eq!(
            LedgerError::InvalidMode("wire".into()).http_status_code(),
            400
        );
        assert_eq!(
            LedgerError::PaymentNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::ProjectNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(LedgerError::Conflict.http_status_code(), 409);
        assert_eq!(
            LedgerError::Database("test".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_retryable_errors() {
        assert!(LedgerError::Conflict.is_retryable());
        assert!(!LedgerError::InvalidAmount(dec!(0)).is_retryable());
        assert!(!LedgerError::PaymentNotFound(Uuid::nil()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::InvalidAmount(dec!(-40.50));
        assert_eq!(
            err.to_string(),
            "Payment amount must be greater than zero, got -40.50"
        );
    }
}
