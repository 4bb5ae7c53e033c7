//! Summary repository: the firm-wide rollup.
//!
//! A pure read-side query. All scans run inside one transaction so the
//! summary is a consistent snapshot; nothing is cached, so nothing can
//! go stale.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, TransactionTrait};
use uuid::Uuid;

use studio_core::summary::{LedgerRow, Summary, SummaryService};

use crate::entities::{
    account_entries, ledger_accounts, payments, project_ledgers,
    sea_orm_active_enums::AccountKind,
};

/// Error types for summary operations.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl SummaryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Database(_) => 500,
        }
    }
}

/// Summary repository computing the dashboard rollup on demand.
#[derive(Debug, Clone)]
pub struct SummaryRepository {
    db: DatabaseConnection,
}

impl SummaryRepository {
    /// Creates a new summary repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes the firm-wide summary across all ledgers and accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if any database query fails.
    pub async fn get_summary(&self) -> Result<Summary, SummaryError> {
        let txn = self.db.begin().await?;

        // Project side: fees from ledger rows, received recomputed from
        // the payment set
        let ledger_rows = project_ledgers::Entity::find().all(&txn).await?;
        let payment_rows = payments::Entity::find().all(&txn).await?;

        let mut received: HashMap<Uuid, Decimal> = HashMap::new();
        for payment in payment_rows {
            *received.entry(payment.project_id).or_default() += payment.amount;
        }

        let ledgers: Vec<LedgerRow> = ledger_rows
            .into_iter()
            .map(|row| LedgerRow {
                project_id: row.project_id,
                total_fee: row.total_fee,
                received: received.get(&row.project_id).copied().unwrap_or_default(),
            })
            .collect();

        // Account side: totals recomputed from the entry set, split by
        // kind
        let accounts = ledger_accounts::Entity::find().all(&txn).await?;
        let entry_rows = account_entries::Entity::find().all(&txn).await?;
        txn.commit().await?;

        let mut totals: HashMap<Uuid, Decimal> = HashMap::new();
        for entry in entry_rows {
            *totals.entry(entry.account_id).or_default() += entry.amount;
        }

        let mut income_totals = Vec::new();
        let mut expense_totals = Vec::new();
        for account in accounts {
            let total = totals.get(&account.id).copied().unwrap_or_default();
            match account.kind {
                AccountKind::Income => income_totals.push(total),
                AccountKind::Expense => expense_totals.push(total),
            }
        }

        Ok(SummaryService::compute(
            &ledgers,
            &income_totals,
            &expense_totals,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_error_display() {
        let err = SummaryError::Database(DbErr::Custom("boom".to_string()));
        assert_eq!(err.to_string(), "Database error: Custom Error: boom");
    }
}
