//! Money helpers with fixed decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All monetary values are `rust_decimal::Decimal` with at most two
//! decimal places. The firm operates in a single currency, so amounts
//! carry no currency tag; formatting is a presentation concern.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places for all monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to the money scale using banker's rounding.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Returns true if the amount has no more than two decimal places.
///
/// Sums of valid amounts stay valid, so derived totals never need
/// re-rounding.
#[must_use]
pub fn is_valid_money_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= MONEY_SCALE
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod money_tests;
