//! `SeaORM` entity definitions.

pub mod account_entries;
pub mod ledger_accounts;
pub mod payments;
pub mod project_ledgers;
pub mod projects;
pub mod sea_orm_active_enums;
