//! Account ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::AccountKind;

/// Errors that can occur during account ledger operations.
#[derive(Debug, Error)]
pub enum AccountError {
    // ========== Validation Errors ==========
    /// Entry amount must be greater than zero.
    #[error("Entry amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),

    /// Amount has more than two decimal places.
    #[error("Amount {0} exceeds the 2 decimal place money scale")]
    InvalidScale(Decimal),

    /// Entry description is required.
    #[error("Entry description must not be empty")]
    EmptyDescription,

    /// Account name is required.
    #[error("Account name must not be empty")]
    EmptyName,

    /// Income entries cannot be attributed to a project.
    #[error("Income entries cannot reference a project")]
    ProjectOnIncomeEntry,

    // ========== Lookup Errors ==========
    /// Account not found for the stated kind.
    #[error("{kind} account not found: {id}")]
    AccountNotFound {
        /// The account kind that was queried.
        kind: AccountKind,
        /// The missing account ID.
        id: Uuid,
    },

    /// Entry not found, or it belongs to a different account/kind.
    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Project referenced by an expense entry does not exist.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    // ========== State Errors ==========
    /// Account name collides within the kind.
    #[error("A {kind} account named \"{name}\" already exists")]
    DuplicateName {
        /// The account kind.
        kind: AccountKind,
        /// The colliding name.
        name: String,
    },

    /// Account still has entries and cannot be deleted.
    #[error("Account {id} still has {entries} entries and cannot be deleted")]
    NotEmpty {
        /// The account ID.
        id: Uuid,
        /// Number of remaining entries.
        entries: u64,
    },

    // ========== Concurrency Errors ==========
    /// Concurrent mutation detected by the storage layer.
    #[error("Concurrent modification detected, please retry")]
    Conflict,

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) | Self::InvalidScale(_) => "INVALID_AMOUNT",
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::EmptyName => "EMPTY_NAME",
            Self::ProjectOnIncomeEntry => "INVALID_REFERENCE",
            Self::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::ProjectNotFound(_) => "PROJECT_NOT_FOUND",
            Self::DuplicateName { .. } => "DUPLICATE_NAME",
            Self::NotEmpty { .. } => "ACCOUNT_NOT_EMPTY",
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
            | Self::InvalidScale(_)
            | Self::EmptyDescription
            | Self::EmptyName
            | Self::ProjectOnIncomeEntry => 400,

            // 404 Not Found
            Self::AccountNotFound { .. } | Self::EntryNotFound(_) | Self::ProjectNotFound(_) => {
                404
            }

            // 409 Conflict - state and concurrency errors
            Self::DuplicateName { .. } | Self::NotEmpty { .. } | Self::Conflict => 409,

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
            AccountError::InvalidAmount(dec!(0)).error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(
            AccountError::DuplicateName {
                kind: AccountKind::Income,
                name: "Consultation Fees".into(),
            }
            .error_code(),
            "DUPLICATE_NAME"
        );
        assert_eq!(
            AccountError::NotEmpty {
                id: Uuid::nil(),
                entries: 3,
            }
            .error_code(),
            "ACCOUNT_NOT_EMPTY"
        );
        assert_eq!(
            AccountError::ProjectOnIncomeEntry.error_code(),
            "INVALID_REFERENCE"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(AccountError::EmptyDescription.http_status_code(), 400);
        assert_eq!(
            AccountError::EntryNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            AccountError::DuplicateName {
                kind: AccountKind::Expense,
                name: "Site Travel".into(),
            }
            .http_status_code(),
            409
        );
        assert_eq!(AccountError::Conflict.http_status_code(), 409);
        assert_eq!(
            AccountError::Database("test".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_retryable_errors() {
        assert!(AccountError::Conflict.is_retryable());
        assert!(!AccountError::EmptyDescription.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = AccountError::DuplicateName {
            kind: AccountKind::Income,
            name: "Consultation Fees".into(),
        };
        assert_eq!(
            err.to_string(),
            "A income account named \"Consultation Fees\" already exists"
        );
    }
}
