//! Repository implementations, one per entity.

pub mod connection;
pub mod event;
pub mod job;
pub mod notification;
pub mod post;
pub mod user;

use vetlink_core::error::{AppError, ErrorKind};

/// PostgreSQL error code for unique-constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error to the unified error type, turning unique-constraint
/// violations into `Conflict` with the given message.
///
/// The constraint at the storage layer is the authoritative duplicate
/// check; callers' existence checks only produce friendlier messages.
pub(crate) fn conflict_on_unique(err: sqlx::Error, conflict_msg: &str, context: &str) -> AppError {
    if let sqlx::Error::Database(ref db) = err {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return AppError::conflict(conflict_msg);
        }
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}
