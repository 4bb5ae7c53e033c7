//! `SeaORM` active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How a payment or entry moved money.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_mode")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Cash.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Bank transfer.
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
    /// Cheque.
    #[sea_orm(string_value = "cheque")]
    Cheque,
    /// UPI.
    #[sea_orm(string_value = "upi")]
    Upi,
    /// Card.
    #[sea_orm(string_value = "card")]
    Card,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Income or expense account.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_kind")]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Other income.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expenses.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<studio_core::ledger::PaymentMode> for PaymentMode {
    fn from(mode: studio_core::ledger::PaymentMode) -> Self {
        use studio_core::ledger::PaymentMode as Core;
        match mode {
            Core::Cash => Self::Cash,
            Core::BankTransfer => Self::BankTransfer,
            Core::Cheque => Self::Cheque,
            Core::Upi => Self::Upi,
            Core::Card => Self::Card,
            Core::Other => Self::Other,
        }
    }
}

impl From<PaymentMode> for studio_core::ledger::PaymentMode {
    fn from(mode: PaymentMode) -> Self {
        match mode {
            PaymentMode::Cash => Self::Cash,
            PaymentMode::BankTransfer => Self::BankTransfer,
            PaymentMode::Cheque => Self::Cheque,
            PaymentMode::Upi => Self::Upi,
            PaymentMode::Card => Self::Card,
            PaymentMode::Other => Self::Other,
        }
    }
}

impl From<studio_core::accounts::AccountKind> for AccountKind {
    fn from(kind: studio_core::accounts::AccountKind) -> Self {
        use studio_core::accounts::AccountKind as Core;
        match kind {
            Core::Income => Self::Income,
            Core::Expense => Self::Expense,
        }
    }
}

impl From<AccountKind> for studio_core::accounts::AccountKind {
    fn from(kind: AccountKind) -> Self {
        match kind {
            AccountKind::Income => Self::Income,
            AccountKind::Expense => Self::Expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_mode_round_trip() {
        use studio_core::ledger::PaymentMode as Core;
        for mode in [
            Core::Cash,
            Core::BankTransfer,
            Core::Cheque,
            Core::Upi,
            Core::Card,
            Core::Other,
        ] {
            assert_eq!(Core::from(PaymentMode::from(mode)), mode);
        }
    }

    #[test]
    fn test_account_kind_round_trip() {
        use studio_core::accounts::AccountKind as Core;
        for kind in [Core::Income, Core::Expense] {
            assert_eq!(Core::from(AccountKind::from(kind)), kind);
        }
    }
}
