//! Error handling for Vigil.
//! One error enum per concern, `thiserror` only, rolled up into [`VigilError`].

pub mod error_code;
pub mod storage_error;
pub mod validation_error;

pub use error_code::VigilErrorCode;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;

/// Top-level error for every Vigil operation.
#[derive(Debug, thiserror::Error)]
pub enum VigilError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid {entity} ID: {reason}")]
    InvalidReference { entity: &'static str, reason: String },

    #[error("invalid payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("store error: {0}")]
    Store(#[from] StorageError),

    #[error("store unavailable after {attempts} attempt(s): {reason}")]
    StoreUnavailable { attempts: u32, reason: String },

    #[error("{operation} timed out after {budget_ms}ms")]
    Timeout { operation: String, budget_ms: u64 },

    #[error("consistency violation: expected {expected} record(s), found {actual}")]
    ConsistencyViolation { expected: usize, actual: usize },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl VigilError {
    /// Reference error for an analysis id that failed to parse or resolve.
    pub fn invalid_reference(reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            entity: "analysis",
            reason: reason.into(),
        }
    }

    /// Reference error for a recommendation row id.
    pub fn invalid_record_reference(reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            entity: "recommendation",
            reason: reason.into(),
        }
    }

    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            reason: reason.into(),
        }
    }

    /// Whether a read that failed with this error may be re-issued.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Store(e) => e.is_transient(),
            Self::StoreUnavailable { .. } | Self::Timeout { .. } => true,
            _ => false,
        }
    }
}

impl VigilErrorCode for VigilError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => error_code::VALIDATION_ERROR,
            Self::InvalidReference { .. } => error_code::INVALID_REFERENCE,
            Self::InvalidPayload { .. } => error_code::INVALID_PAYLOAD,
            Self::Store(StorageError::ConnectionUnavailable { .. })
            | Self::StoreUnavailable { .. } => error_code::STORE_UNAVAILABLE,
            Self::Store(_) => error_code::STORE_ERROR,
            Self::Timeout { .. } => error_code::TIMEOUT,
            Self::ConsistencyViolation { .. } => error_code::CONSISTENCY_VIOLATION,
            Self::ConfigError(_) => error_code::CONFIG_ERROR,
            Self::SerializationError(_) => error_code::SERIALIZATION_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::InvalidReference { .. } => "reference",
            Self::InvalidPayload { .. } => "payload",
            Self::Store(StorageError::ConnectionUnavailable { .. })
            | Self::StoreUnavailable { .. } => "unavailable",
            Self::Store(_) | Self::SerializationError(_) => "query",
            Self::Timeout { .. } => "timeout",
            Self::ConsistencyViolation { .. } => "consistency",
            Self::ConfigError(_) => "config",
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type VigilResult<T> = Result<T, VigilError>;
