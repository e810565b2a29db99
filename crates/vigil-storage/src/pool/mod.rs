//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use vigil_core::errors::VigilResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and, for file-backed databases, the
/// read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    /// `None` for in-memory databases: a separate in-memory connection would
    /// be a different, empty database.
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open the writer for the given database file. Readers are attached by
    /// [`ConnectionPool::attach_readers`] once the schema exists.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> VigilResult<Self> {
        let writer = WriteConnection::open(path, busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers: None,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory connection pool (for testing). All reads go
    /// through the writer.
    pub fn open_in_memory() -> VigilResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory()?,
            readers: None,
            db_path: None,
        })
    }

    /// Open the read pool against the same file as the writer.
    pub fn attach_readers(&mut self, pool_size: usize, busy_timeout_ms: u32) -> VigilResult<()> {
        if let Some(path) = &self.db_path {
            self.readers = Some(ReadPool::open(path, pool_size, busy_timeout_ms)?);
        }
        Ok(())
    }
}
