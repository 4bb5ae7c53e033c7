//! Shared types and configuration for Studio Ledger.
//!
//! This crate provides common types used across all other crates:
//! - Money helpers with fixed 2-decimal precision
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
