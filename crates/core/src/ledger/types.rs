//! Ledger domain types for fee and payment tracking.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a payment was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Cash payment.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Cheque.
    Cheque,
    /// UPI transfer.
    Upi,
    /// Card payment.
    Card,
    /// Anything else.
    Other,
}

impl PaymentMode {
    /// Returns the wire representation of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::BankTransfer => "bank_transfer",
            Self::Cheque => "cheque",
            Self::Upi => "upi",
            Self::Card => "card",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "bank_transfer" => Ok(Self::BankTransfer),
            "cheque" => Ok(Self::Cheque),
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown payment mode: {s}")),
        }
    }
}

/// A recorded payment against a project's fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment ID.
    pub id: Uuid,
    /// The project this payment belongs to.
    pub project_id: Uuid,
    /// Payment amount (always positive).
    pub amount: Decimal,
    /// Date the payment was received.
    pub payment_date: NaiveDate,
    /// How the payment was received.
    pub payment_mode: PaymentMode,
    /// Bank account the payment landed in.
    pub bank_account: Option<String>,
    /// External reference (cheque number, UTR, ...).
    pub reference_number: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Input for recording a new payment.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    /// Payment amount (must be positive).
    pub amount: Decimal,
    /// Date the payment was received.
    pub payment_date: NaiveDate,
    /// How the payment was received.
    pub payment_mode: PaymentMode,
    /// Bank account the payment landed in.
    pub bank_account: Option<String>,
    /// External reference.
    pub reference_number: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Partial update for an existing payment.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PaymentPatch {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New payment date.
    pub payment_date: Option<NaiveDate>,
    /// New payment mode.
    pub payment_mode: Option<PaymentMode>,
    /// New bank account.
    pub bank_account: Option<String>,
    /// New reference.
    pub reference_number: Option<String>,
    /// New notes.
    pub notes: Option<String>,
}

/// Derived totals for a project ledger.
///
/// `received_amount` is always the sum of current payments; it is never
/// stored as an independently mutable value. `pending_amount` may go
/// negative on overpayment - it is deliberately unclamped so callers can
/// detect a refund-due state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerTotals {
    /// The project's agreed fee.
    pub total_fee: Decimal,
    /// Sum of all current payment amounts.
    pub received_amount: Decimal,
    /// `total_fee - received_amount`, unclamped.
    pub pending_amount: Decimal,
}

impl LedgerTotals {
    /// Creates totals from a fee and the recomputed received sum.
    #[must_use]
    pub fn new(total_fee: Decimal, received_amount: Decimal) -> Self {
        Self {
            total_fee,
            received_amount,
            pending_amount: total_fee - received_amount,
        }
    }

    /// Returns true if more has been received than the agreed fee.
    #[must_use]
    pub fn is_overpaid(&self) -> bool {
        self.pending_amount.is_sign_negative() && !self.pending_amount.is_zero()
    }
}

/// Full ledger view for one project.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSnapshot {
    /// The project this ledger belongs to.
    pub project_id: Uuid,
    /// Derived totals.
    #[serde(flatten)]
    pub totals: LedgerTotals,
    /// Ledger notes.
    pub notes: Option<String>,
    /// Payments sorted by payment date descending.
    pub payments: Vec<Payment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_mode_round_trip() {
        for mode in [
            PaymentMode::Cash,
            PaymentMode::BankTransfer,
            PaymentMode::Cheque,
            PaymentMode::Upi,
            PaymentMode::Card,
            PaymentMode::Other,
        ] {
            assert_eq!(mode.as_str().parse::<PaymentMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_payment_mode_unknown() {
        assert!("wire".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn test_ledger_totals_pending() {
        let totals = LedgerTotals::new(dec!(100000), dec!(40000));
        assert_eq!(totals.pending_amount, dec!(60000));
        assert!(!totals.is_overpaid());
    }

    #[test]
    fn test_ledger_totals_overpaid_goes_negative() {
        let totals = LedgerTotals::new(dec!(50000), dec!(60000));
        assert_eq!(totals.pending_amount, dec!(-10000));
        assert!(totals.is_overpaid());
    }

    #[test]
    fn test_ledger_totals_exact() {
        let totals = LedgerTotals::new(dec!(50000), dec!(50000));
        assert_eq!(totals.pending_amount, dec!(0));
        assert!(!totals.is_overpaid());
    }
}
