//! Account ledger validation and aggregate recomputation.
//!
//! Account totals follow the same rule as project payments: always the
//! full sum over the current entry set, never an incrementally patched
//! counter.

use rust_decimal::Decimal;

use studio_shared::types::is_valid_money_scale;

use super::error::AccountError;
use super::types::{AccountKind, Entry, EntryInput, EntryPatch};

/// Account service with pure validation and aggregation logic.
pub struct AccountService;

impl AccountService {
    /// Validates an account name.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` if the name is blank.
    pub fn validate_name(name: &str) -> Result<(), AccountError> {
        if name.trim().is_empty() {
            return Err(AccountError::EmptyName);
        }
        Ok(())
    }

    /// Validates an entry amount.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for zero or negative amounts and
    /// `InvalidScale` for amounts finer than two decimal places.
    pub fn validate_amount(amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount(amount));
        }
        if !is_valid_money_scale(amount) {
            return Err(AccountError::InvalidScale(amount));
        }
        Ok(())
    }

    /// Validates a new entry for an account of the given kind.
    ///
    /// Income entries must not carry a project attribution; an expense
    /// entry's `project_id` (if any) is checked for existence by the
    /// repository.
    ///
    /// # Errors
    ///
    /// Returns `AccountError` if any field violates the rules above.
    pub fn validate_entry(kind: AccountKind, input: &EntryInput) -> Result<(), AccountError> {
        Self::validate_amount(input.amount)?;
        if input.description.trim().is_empty() {
            return Err(AccountError::EmptyDescription);
        }
        if kind == AccountKind::Income && input.project_id.is_some() {
            return Err(AccountError::ProjectOnIncomeEntry);
        }
        Ok(())
    }

    /// Applies a partial update to an entry, validating changed fields.
    ///
    /// # Errors
    ///
    /// Returns `AccountError` if the new amount or description is invalid.
    pub fn apply_patch(entry: &mut Entry, patch: &EntryPatch) -> Result<(), AccountError> {
        if let Some(amount) = patch.amount {
            Self::validate_amount(amount)?;
        }
        if let Some(description) = &patch.description {
            if description.trim().is_empty() {
                return Err(AccountError::EmptyDescription);
            }
        }

        // All validation passed; nothing below can fail
        if let Some(amount) = patch.amount {
            entry.amount = amount;
        }
        if let Some(date) = patch.entry_date {
            entry.entry_date = date;
        }
        if let Some(description) = &patch.description {
            entry.description = description.clone();
        }
        if let Some(mode) = patch.payment_mode {
            entry.payment_mode = mode;
        }
        if let Some(bank_account) = &patch.bank_account {
            entry.bank_account = Some(bank_account.clone());
        }
        if let Some(reference) = &patch.reference_number {
            entry.reference_number = Some(reference.clone());
        }
        if let Some(counterpart) = &patch.counterpart_name {
            entry.counterpart_name = Some(counterpart.clone());
        }
        Ok(())
    }

    /// Recomputes an account total as the full sum of its entry set.
    #[must_use]
    pub fn account_total(entries: &[Entry]) -> Decimal {
        entries.iter().map(|e| e.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::ledger::types::PaymentMode;

    fn make_input(amount: Decimal) -> EntryInput {
        EntryInput {
            amount,
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
            description: "Workshop honorarium".to_string(),
            payment_mode: PaymentMode::BankTransfer,
            bank_account: None,
            reference_number: None,
            counterpart_name: Some("City Arts Council".to_string()),
            project_id: None,
        }
    }

    fn make_entry(amount: Decimal) -> Entry {
        let input = make_input(amount);
        Entry {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            amount: input.amount,
            entry_date: input.entry_date,
            description: input.description,
            payment_mode: input.payment_mode,
            bank_account: input.bank_account,
            reference_number: input.reference_number,
            counterpart_name: input.counterpart_name,
            project_id: None,
        }
    }

    #[test]
    fn test_validate_entry_ok() {
        assert!(AccountService::validate_entry(AccountKind::Income, &make_input(dec!(5000))).is_ok());
    }

    #[test]
    fn test_validate_entry_rejects_zero_amount() {
        assert!(matches!(
            AccountService::validate_entry(AccountKind::Income, &make_input(dec!(0))),
            Err(AccountError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_validate_entry_rejects_blank_description() {
        let mut input = make_input(dec!(5000));
        input.description = "   ".to_string();
        assert!(matches!(
            AccountService::validate_entry(AccountKind::Expense, &input),
            Err(AccountError::EmptyDescription)
        ));
    }

    #[test]
    fn test_income_entry_rejects_project_attribution() {
        let mut input = make_input(dec!(5000));
        input.project_id = Some(Uuid::new_v4());
        assert!(matches!(
            AccountService::validate_entry(AccountKind::Income, &input),
            Err(AccountError::ProjectOnIncomeEntry)
        ));
        // Same input is fine on an expense account
        assert!(AccountService::validate_entry(AccountKind::Expense, &input).is_ok());
    }

    #[test]
    fn test_account_total_is_full_sum() {
        let entries = vec![make_entry(dec!(5000)), make_entry(dec!(3000))];
        assert_eq!(AccountService::account_total(&entries), dec!(8000));
    }

    #[test]
    fn test_account_total_empty() {
        assert_eq!(AccountService::account_total(&[]), dec!(0));
    }

    #[test]
    fn test_apply_patch_replaces_amount() {
        let mut entry = make_entry(dec!(5000));
        let patch = EntryPatch {
            amount: Some(dec!(7500)),
            ..EntryPatch::default()
        };
        AccountService::apply_patch(&mut entry, &patch).unwrap();
        assert_eq!(entry.amount, dec!(7500));
    }

    #[test]
    fn test_apply_patch_rejects_before_mutating() {
        let mut entry = make_entry(dec!(5000));
        let patch = EntryPatch {
            amount: Some(dec!(7500)),
            description: Some(String::new()),
            ..EntryPatch::default()
        };
        assert!(AccountService::apply_patch(&mut entry, &patch).is_err());
        // Amount untouched even though it was valid on its own
        assert_eq!(entry.amount, dec!(5000));
    }

}
