//! Shared domain types.

pub mod money;

pub use money::{MONEY_SCALE, is_valid_money_scale, round_money};
