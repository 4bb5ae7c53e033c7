//! Firm-wide summary aggregation.
//!
//! The summary is a pure read-side view: it is computed from the current
//! ledgers and account totals on every read and never persisted, so there
//! is nothing to keep in sync.

pub mod service;
pub mod types;

pub use service::SummaryService;
pub use types::{ExpenseSummary, IncomeSummary, LedgerRow, Summary};
