//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every mutation recomputes derived aggregates from the
//! full row set inside its own serializable transaction.

mod conflict;

pub mod account;
pub mod fee_ledger;
pub mod project;
pub mod summary;

pub use account::AccountRepository;
pub use fee_ledger::FeeLedgerRepository;
pub use project::{CreateProjectInput, ProjectError, ProjectRepository};
pub use summary::{SummaryError, SummaryRepository};
