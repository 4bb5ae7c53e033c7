//! Account ledger domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::types::PaymentMode;

/// Which side of the books an account lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Other income (non-project revenue).
    Income,
    /// Expenses.
    Expense,
}

impl AccountKind {
    /// Returns the wire representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown account kind: {s}")),
        }
    }
}

/// A named income or expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Account ID.
    pub id: Uuid,
    /// Income or expense.
    pub kind: AccountKind,
    /// Account name, unique within the kind.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
}

/// An account together with its derived total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountTotal {
    /// The account.
    #[serde(flatten)]
    pub account: Account,
    /// Sum of all current entry amounts.
    pub total: Decimal,
}

/// One recorded amount in an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry ID.
    pub id: Uuid,
    /// The account this entry belongs to.
    pub account_id: Uuid,
    /// Entry amount (always positive).
    pub amount: Decimal,
    /// Date of the income/expense.
    pub entry_date: NaiveDate,
    /// What the entry was for.
    pub description: String,
    /// How the money moved.
    pub payment_mode: PaymentMode,
    /// Bank account involved.
    pub bank_account: Option<String>,
    /// External reference.
    pub reference_number: Option<String>,
    /// Source name (income) or vendor name (expense).
    pub counterpart_name: Option<String>,
    /// Project the cost is attributed to (expense entries only).
    pub project_id: Option<Uuid>,
}

/// Input for recording a new entry.
#[derive(Debug, Clone)]
pub struct EntryInput {
    /// Entry amount (must be positive).
    pub amount: Decimal,
    /// Date of the income/expense.
    pub entry_date: NaiveDate,
    /// What the entry was for (required, non-empty).
    pub description: String,
    /// How the money moved.
    pub payment_mode: PaymentMode,
    /// Bank account involved.
    pub bank_account: Option<String>,
    /// External reference.
    pub reference_number: Option<String>,
    /// Source name (income) or vendor name (expense).
    pub counterpart_name: Option<String>,
    /// Project attribution (expense entries only).
    pub project_id: Option<Uuid>,
}

/// Partial update for an existing entry.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New entry date.
    pub entry_date: Option<NaiveDate>,
    /// New description.
    pub description: Option<String>,
    /// New payment mode.
    pub payment_mode: Option<PaymentMode>,
    /// New bank account.
    pub bank_account: Option<String>,
    /// New reference.
    pub reference_number: Option<String>,
    /// New counterpart name.
    pub counterpart_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_kind_round_trip() {
        assert_eq!("income".parse::<AccountKind>(), Ok(AccountKind::Income));
        assert_eq!("expense".parse::<AccountKind>(), Ok(AccountKind::Expense));
        assert_eq!(AccountKind::Income.to_string(), "income");
        assert_eq!(AccountKind::Expense.to_string(), "expense");
    }

    #[test]
    fn test_account_kind_unknown() {
        assert!("revenue".parse::<AccountKind>().is_err());
    }
}
