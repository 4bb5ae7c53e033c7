//! Summary view types.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Income side of the firm-wide summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncomeSummary {
    /// Sum of `total_fee` over all project ledgers.
    pub total_fee: Decimal,
    /// Sum of derived `received_amount` over all project ledgers.
    pub received: Decimal,
    /// `total_fee - received`, unclamped.
    pub pending: Decimal,
    /// Sum of all income account totals.
    pub other_income: Decimal,
}

/// Expense side of the firm-wide summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpenseSummary {
    /// Sum of all expense account totals.
    pub total: Decimal,
}

/// The firm-wide rollup, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Income totals.
    pub income: IncomeSummary,
    /// Expense totals.
    pub expenses: ExpenseSummary,
    /// `received + other_income - expenses.total`.
    pub net_position: Decimal,
}

/// One project ledger's contribution to the summary.
#[derive(Debug, Clone, Copy)]
pub struct LedgerRow {
    /// The project.
    pub project_id: Uuid,
    /// The project's agreed fee.
    pub total_fee: Decimal,
    /// Recomputed received sum for the project.
    pub received: Decimal,
}
