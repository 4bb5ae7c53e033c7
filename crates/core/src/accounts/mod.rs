//! Categorized income and expense accounts.
//!
//! One shared implementation parameterized by [`AccountKind`] covers both
//! the "other income" and "expense" ledgers:
//! - Named accounts, unique per kind
//! - Entries with derived per-account totals (recomputed from the set)
//! - Validation rules for entries and project attribution

pub mod error;
pub mod service;
pub mod types;

pub use error::AccountError;
pub use service::AccountService;
pub use types::{Account, AccountKind, AccountTotal, Entry, EntryInput, EntryPatch};
