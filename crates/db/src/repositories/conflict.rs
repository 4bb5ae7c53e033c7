//! Detection of serialization failures.
//!
//! Mutations run under `SERIALIZABLE` isolation; when PostgreSQL aborts
//! one of two interleaved transactions it raises SQLSTATE 40001 (or
//! 40P01 for deadlocks). Those map to the retryable `Conflict` error
//! instead of a generic database error.

use sea_orm::{DbErr, SqlErr};

/// Returns true if the error is a serialization failure or deadlock.
pub(crate) fn is_serialization_failure(err: &DbErr) -> bool {
    let msg = err.to_string();
    msg.contains("40001") || msg.contains("40P01") || msg.contains("could not serialize access")
}

/// Returns true if the error is a unique constraint violation
/// (SQLSTATE 23505).
///
/// Under serializable isolation a racing insert on a unique index does
/// not raise 40001: the loser blocks on the in-flight index entry and
/// gets unique_violation after the winner commits. Callers whose unique
/// index encodes "one row per parent" map this to the retryable
/// `Conflict` error.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }
    let msg = err.to_string();
    msg.contains("23505") || msg.contains("duplicate key value violates unique constraint")
}
