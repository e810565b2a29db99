/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("transaction failed during {stage}: {message}")]
    TransactionFailed { stage: String, message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("database corruption detected: {details}")]
    CorruptionDetected { details: String },

    #[error("store connection unavailable: {reason}")]
    ConnectionUnavailable { reason: String },
}

impl StorageError {
    /// Whether a read that hit this error may be attempted again.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ConnectionUnavailable { .. })
    }
}
