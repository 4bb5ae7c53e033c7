//! Tests for account row/domain conversion.

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::entities::{
    account_entries, ledger_accounts,
    sea_orm_active_enums::{AccountKind, PaymentMode},
};
use studio_core::accounts::AccountKind as CoreKind;

use super::{account_to_domain, entry_to_domain};

#[test]
fn test_account_to_domain() {
    let id = Uuid::new_v4();
    let model = ledger_accounts::Model {
        id,
        kind: AccountKind::Income,
        name: "Consultation Fees".to_string(),
        description: Some("One-off consultations".to_string()),
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    };

    let account = account_to_domain(model);
    assert_eq!(account.id, id);
    assert_eq!(account.kind, CoreKind::Income);
    assert_eq!(account.name, "Consultation Fees");
    assert_eq!(account.description.as_deref(), Some("One-off consultations"));
}

#[test]
fn test_entry_to_domain_carries_all_fields() {
    let id = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    let model = account_entries::Model {
        id,
        account_id,
        amount: dec!(1200.50),
        entry_date: NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(),
        description: "Site travel - metro extension".to_string(),
        payment_mode: PaymentMode::Upi,
        bank_account: None,
        reference_number: Some("UPI-4471".to_string()),
        counterpart_name: Some("Metro Cabs".to_string()),
        project_id: Some(project_id),
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    };

    let entry = entry_to_domain(model);
    assert_eq!(entry.id, id);
    assert_eq!(entry.account_id, account_id);
    assert_eq!(entry.amount, dec!(1200.50));
    assert_eq!(
        entry.payment_mode,
        studio_core::ledger::PaymentMode::Upi
    );
    assert_eq!(entry.counterpart_name.as_deref(), Some("Metro Cabs"));
    assert_eq!(entry.project_id, Some(project_id));
}
