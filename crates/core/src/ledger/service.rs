//! Ledger service for fee/payment validation and aggregate recomputation.
//!
//! The load-bearing rule lives here: `received_amount` is always recomputed
//! from the full payment set, never incremented or decremented. Edits and
//! deletes need no "undo the old value" bookkeeping, at the cost of an O(n)
//! scan per mutation - per-project payment counts are small.

use rust_decimal::Decimal;

use studio_shared::types::is_valid_money_scale;

use super::error::LedgerError;
use super::types::{LedgerTotals, Payment, PaymentInput, PaymentPatch};

/// Ledger service with pure validation and aggregation logic.
///
/// No database dependencies; repositories call into this inside their
/// own transactions.
pub struct LedgerService;

impl LedgerService {
    /// Validates a total fee value.
    ///
    /// # Errors
    ///
    /// Returns `NegativeFee` for negative amounts and `InvalidScale` for
    /// amounts finer than two decimal places.
    pub fn validate_fee(amount: Decimal) -> Result<(), LedgerError> {
        if amount.is_sign_negative() {
            return Err(LedgerError::NegativeFee(amount));
        }
        if !is_valid_money_scale(amount) {
            return Err(LedgerError::InvalidScale(amount));
        }
        Ok(())
    }

    /// Validates a payment amount.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for zero or negative amounts and
    /// `InvalidScale` for amounts finer than two decimal places.
    pub fn validate_payment_amount(amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if !is_valid_money_scale(amount) {
            return Err(LedgerError::InvalidScale(amount));
        }
        Ok(())
    }

    /// Validates a new payment before it is appended.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the amount is invalid.
    pub fn validate_payment(input: &PaymentInput) -> Result<(), LedgerError> {
        Self::validate_payment_amount(input.amount)
    }

    /// Applies a partial update to a payment, validating changed fields.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the new amount is invalid.
    pub fn apply_patch(payment: &mut Payment, patch: &PaymentPatch) -> Result<(), LedgerError> {
        if let Some(amount) = patch.amount {
            Self::validate_payment_amount(amount)?;
            payment.amount = amount;
        }
        if let Some(date) = patch.payment_date {
            payment.payment_date = date;
        }
        if let Some(mode) = patch.payment_mode {
            payment.payment_mode = mode;
        }
        if let Some(bank_account) = &patch.bank_account {
            payment.bank_account = Some(bank_account.clone());
        }
        if let Some(reference) = &patch.reference_number {
            payment.reference_number = Some(reference.clone());
        }
        if let Some(notes) = &patch.notes {
            payment.notes = Some(notes.clone());
        }
        Ok(())
    }

    /// Recomputes the received amount as the full sum of the payment set.
    #[must_use]
    pub fn received_amount(payments: &[Payment]) -> Decimal {
        payments.iter().map(|p| p.amount).sum()
    }

    /// Recomputes ledger totals from the fee and the full payment set.
    #[must_use]
    pub fn totals(total_fee: Decimal, payments: &[Payment]) -> LedgerTotals {
        LedgerTotals::new(total_fee, Self::received_amount(payments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::ledger::types::PaymentMode;

    fn make_payment(amount: Decimal, date: NaiveDate) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            amount,
            payment_date: date,
            payment_mode: PaymentMode::BankTransfer,
            bank_account: None,
            reference_number: None,
            notes: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_fee_accepts_zero() {
        assert!(LedgerService::validate_fee(dec!(0)).is_ok());
        assert!(LedgerService::validate_fee(dec!(100000)).is_ok());
    }

    #[test]
    fn test_validate_fee_rejects_negative() {
        assert!(matches!(
            LedgerService::validate_fee(dec!(-1)),
            Err(LedgerError::NegativeFee(_))
        ));
    }

    #[test]
    fn test_validate_fee_rejects_fine_scale() {
        assert!(matches!(
            LedgerService::validate_fee(dec!(100.999)),
            Err(LedgerError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_validate_payment_amount_rejects_zero() {
        assert!(matches!(
            LedgerService::validate_payment_amount(dec!(0)),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_validate_payment_amount_rejects_negative() {
        assert!(matches!(
            LedgerService::validate_payment_amount(dec!(-40000)),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_received_amount_is_full_sum() {
        let payments = vec![
            make_payment(dec!(40000), date(2026, 1, 10)),
            make_payment(dec!(25000.50), date(2026, 2, 1)),
            make_payment(dec!(0.50), date(2026, 2, 2)),
        ];
        assert_eq!(LedgerService::received_amount(&payments), dec!(65001.00));
    }

    #[test]
    fn test_received_amount_empty() {
        assert_eq!(LedgerService::received_amount(&[]), dec!(0));
    }

    #[test]
    fn test_totals_pending_unclamped() {
        let payments = vec![make_payment(dec!(60000), date(2026, 1, 10))];
        let totals = LedgerService::totals(dec!(50000), &payments);
        assert_eq!(totals.received_amount, dec!(60000));
        assert_eq!(totals.pending_amount, dec!(-10000));
    }

    #[test]
    fn test_apply_patch_replaces_amount() {
        // Updating 40000 -> 50000 replaces the value; received must not
        // come out as if both had been added
        let mut payment = make_payment(dec!(40000), date(2026, 1, 10));
        let patch = PaymentPatch {
            amount: Some(dec!(50000)),
            ..PaymentPatch::default()
        };
        LedgerService::apply_patch(&mut payment, &patch).unwrap();
        assert_eq!(payment.amount, dec!(50000));
        assert_eq!(LedgerService::received_amount(&[payment]), dec!(50000));
    }

    #[test]
    fn test_apply_patch_rejects_bad_amount() {
        let mut payment = make_payment(dec!(40000), date(2026, 1, 10));
        let patch = PaymentPatch {
            amount: Some(dec!(0)),
            ..PaymentPatch::default()
        };
        assert!(LedgerService::apply_patch(&mut payment, &patch).is_err());
        // Rejected before any mutation
        assert_eq!(payment.amount, dec!(40000));
    }

    #[test]
    fn test_apply_patch_partial_fields() {
        let mut payment = make_payment(dec!(40000), date(2026, 1, 10));
        let patch = PaymentPatch {
            payment_mode: Some(PaymentMode::Cheque),
            reference_number: Some("CHQ-118".to_string()),
            ..PaymentPatch::default()
        };
        LedgerService::apply_patch(&mut payment, &patch).unwrap();
        assert_eq!(payment.amount, dec!(40000));
        assert_eq!(payment.payment_mode, PaymentMode::Cheque);
        assert_eq!(payment.reference_number.as_deref(), Some("CHQ-118"));
        assert_eq!(payment.payment_date, date(2026, 1, 10));
    }

}
