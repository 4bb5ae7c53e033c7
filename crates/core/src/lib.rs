//! Core business logic for Studio Ledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and aggregate calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Per-project fee and payment tracking
//! - `accounts` - Categorized income/expense accounts
//! - `summary` - Firm-wide summary aggregation

pub mod accounts;
pub mod ledger;
pub mod summary;
