//! Single write connection behind a mutex.
//! Writes are serialized here, so this layer never has two write
//! transactions open on the same handle.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use vigil_core::errors::{StorageError, VigilResult};

use super::pragmas::apply_pragmas;
use crate::sql_err;

/// The one connection allowed to write.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> VigilResult<Self> {
        let conn = Connection::open(path).map_err(sql_err("open writer"))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> VigilResult<Self> {
        let conn = Connection::open_in_memory().map_err(sql_err("open in-memory writer"))?;
        apply_pragmas(&conn, 0)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    ///
    /// Blocks the calling thread; async callers run this on a blocking task.
    pub fn with_conn_sync<F, T>(&self, f: F) -> VigilResult<T>
    where
        F: FnOnce(&Connection) -> VigilResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| StorageError::ConnectionUnavailable {
                reason: format!("write connection lock poisoned: {e}"),
            })?;
        f(&guard)
    }
}
