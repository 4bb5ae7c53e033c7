//! Per-project fee and payment tracking.
//!
//! This module implements the project income ledger:
//! - Payment transactions against a project's fee
//! - Derived received/pending aggregates (always recomputed, never patched)
//! - Validation rules for fees and payments
//! - Error types for ledger operations

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{
    LedgerSnapshot, LedgerTotals, Payment, PaymentInput, PaymentMode, PaymentPatch,
};
