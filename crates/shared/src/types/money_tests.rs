//! Tests for money helpers.

use super::*;
use rstest::rstest;
use rust_decimal_macros::dec;

#[test]
fn test_round_money_half_even() {
    // Banker's rounding: ties go to the even neighbor
    assert_eq!(round_money(dec!(1.005)), dec!(1.00));
    assert_eq!(round_money(dec!(1.015)), dec!(1.02));
    assert_eq!(round_money(dec!(1.0449)), dec!(1.04));
}

#[test]
fn test_round_money_idempotent() {
    let amount = dec!(42.37);
    assert_eq!(round_money(round_money(amount)), round_money(amount));
}

#[rstest]
#[case(dec!(0), true)]
#[case(dec!(100), true)]
#[case(dec!(40000.50), true)]
#[case(dec!(99.99), true)]
#[case(dec!(1.999), false)]
#[case(dec!(0.001), false)]
fn test_is_valid_money_scale(#[case] amount: Decimal, #[case] expected: bool) {
    assert_eq!(is_valid_money_scale(amount), expected);
}

#[test]
fn test_trailing_zeros_are_valid() {
    // 1.100 normalizes to 1.1 - scale check must not reject it
    assert!(is_valid_money_scale(dec!(1.100)));
    assert!(is_valid_money_scale(dec!(5.00000)));
}
