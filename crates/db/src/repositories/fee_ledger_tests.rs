//! Tests for fee ledger row/domain conversion and error mapping.

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use sea_orm::DbErr;
use uuid::Uuid;

use studio_core::ledger::LedgerError;

use crate::entities::{payments, sea_orm_active_enums::PaymentMode};

use super::{map_insert_err, payment_to_domain};

fn make_row(amount: rust_decimal::Decimal) -> payments::Model {
    payments::Model {
        id: Uuid::new_v4(),
        project_id: Uuid::new_v4(),
        amount,
        payment_date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
        payment_mode: PaymentMode::BankTransfer,
        bank_account: Some("HDFC-0042".to_string()),
        reference_number: Some("UTR-99812".to_string()),
        notes: None,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

#[test]
fn test_payment_to_domain_carries_all_fields() {
    let row = make_row(dec!(40000));
    let id = row.id;
    let project_id = row.project_id;

    let payment = payment_to_domain(row);
    assert_eq!(payment.id, id);
    assert_eq!(payment.project_id, project_id);
    assert_eq!(payment.amount, dec!(40000));
    assert_eq!(
        payment.payment_date,
        NaiveDate::from_ymd_opt(2026, 4, 2).unwrap()
    );
    assert_eq!(
        payment.payment_mode,
        studio_core::ledger::PaymentMode::BankTransfer
    );
    assert_eq!(payment.bank_account.as_deref(), Some("HDFC-0042"));
    assert_eq!(payment.reference_number.as_deref(), Some("UTR-99812"));
    assert_eq!(payment.notes, None);
}

#[test]
fn test_payment_amounts_stay_exact() {
    // NUMERIC(14,2) round-trips through Decimal without float drift
    let payment = payment_to_domain(make_row(dec!(12345678.91)));
    assert_eq!(payment.amount, dec!(12345678.91));
}

#[test]
fn test_racing_first_mutations_map_to_conflict() {
    // Two first mutations for the same project: the loser's insert hits
    // the unique project_id index (23505, not 40001) and must surface
    // as the retryable Conflict
    let err = DbErr::Custom(
        "error returned from database: duplicate key value violates unique constraint \
         \"project_ledgers_project_id_key\""
            .to_string(),
    );
    assert!(matches!(map_insert_err(err), LedgerError::Conflict));
}

#[test]
fn test_serialization_failure_maps_to_conflict_on_insert() {
    let err = DbErr::Custom("could not serialize access due to concurrent update".to_string());
    assert!(matches!(map_insert_err(err), LedgerError::Conflict));
}

#[test]
fn test_other_insert_errors_stay_database() {
    let err = DbErr::Custom("connection reset by peer".to_string());
    assert!(matches!(map_insert_err(err), LedgerError::Database(_)));
}
