//! # vigil-storage
//!
//! SQLite persistence for analyses and their recommendations: a single write
//! connection, a read pool for file-backed databases, versioned migrations,
//! and all-or-nothing batch inserts.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use rusqlite::ErrorCode;
use vigil_core::errors::{StorageError, VigilError};

/// Convert a message into a generic SQLite storage error.
pub(crate) fn to_storage_err(message: String) -> VigilError {
    StorageError::SqliteError { message }.into()
}

/// Classify a rusqlite error so that transient conditions (busy, locked,
/// cannot open) can be retried by readers.
pub(crate) fn classify_sqlite_err(context: &str, err: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        match failure.code {
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen => {
                return StorageError::ConnectionUnavailable {
                    reason: format!("{context}: {err}"),
                };
            }
            ErrorCode::DatabaseCorrupt | ErrorCode::NotADatabase => {
                return StorageError::CorruptionDetected {
                    details: format!("{context}: {err}"),
                };
            }
            _ => {}
        }
    }
    StorageError::SqliteError {
        message: format!("{context}: {err}"),
    }
}

/// Shorthand for `classify_sqlite_err` lifted into [`VigilError`].
pub(crate) fn sql_err(context: &str) -> impl FnOnce(rusqlite::Error) -> VigilError + '_ {
    move |e| classify_sqlite_err(context, e).into()
}
