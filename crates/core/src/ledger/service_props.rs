//! Property-based tests for aggregate recomputation.
//!
//! The invariant under test: after any sequence of add/update/delete
//! operations, `received_amount` equals the sum of the current payment set.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::service::LedgerService;
use super::types::{Payment, PaymentMode, PaymentPatch};

/// Positive amounts at money scale (0.01 ..= 10,000.00).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Non-negative fees at money scale.
fn fee_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

#[derive(Debug, Clone)]
enum Op {
    Add(Decimal),
    Update(usize, Decimal),
    Delete(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        amount_strategy().prop_map(Op::Add),
        (any::<usize>(), amount_strategy()).prop_map(|(i, a)| Op::Update(i, a)),
        any::<usize>().prop_map(Op::Delete),
    ]
}

fn make_payment(amount: Decimal) -> Payment {
    Payment {
        id: Uuid::new_v4(),
        project_id: Uuid::nil(),
        amount,
        payment_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        payment_mode: PaymentMode::Cash,
        bank_account: None,
        reference_number: None,
        notes: None,
    }
}

proptest! {
    #[test]
    fn received_equals_sum_after_any_op_sequence(
        ops in proptest::collection::vec(op_strategy(), 0..40),
        fee in fee_strategy(),
    ) {
        let mut payments: Vec<Payment> = Vec::new();

        for op in ops {
            match op {
                Op::Add(amount) => payments.push(make_payment(amount)),
                Op::Update(i, amount) => {
                    if !payments.is_empty() {
                        let i = i % payments.len();
                        let patch = PaymentPatch { amount: Some(amount), ..PaymentPatch::default() };
                        LedgerService::apply_patch(&mut payments[i], &patch).unwrap();
                    }
                }
                Op::Delete(i) => {
                    if !payments.is_empty() {
                        let i = i % payments.len();
                        payments.remove(i);
                    }
                }
            }

            // Invariant after every mutation, not just at the end
            let expected: Decimal = payments.iter().map(|p| p.amount).sum();
            prop_assert_eq!(LedgerService::received_amount(&payments), expected);

            let totals = LedgerService::totals(fee, &payments);
            prop_assert_eq!(totals.received_amount, expected);
            prop_assert_eq!(totals.pending_amount, fee - expected);
        }
    }

    #[test]
    fn recomputation_is_idempotent(
        amounts in proptest::collection::vec(amount_strategy(), 0..30),
        fee in fee_strategy(),
    ) {
        let payments: Vec<Payment> = amounts.into_iter().map(make_payment).collect();
        let first = LedgerService::totals(fee, &payments);
        let second = LedgerService::totals(fee, &payments);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn add_then_delete_restores_aggregate(
        amounts in proptest::collection::vec(amount_strategy(), 1..20),
        extra in amount_strategy(),
    ) {
        let mut payments: Vec<Payment> = amounts.into_iter().map(make_payment).collect();
        let before = LedgerService::received_amount(&payments);

        payments.push(make_payment(extra));
        prop_assert_eq!(LedgerService::received_amount(&payments), before + extra);

        payments.pop();
        prop_assert_eq!(LedgerService::received_amount(&payments), before);
    }
}
