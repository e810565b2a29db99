//! VigilErrorCode trait for boundary conversion.

/// Every error exposed across the gateway provides a stable code and a
/// coarse `error_type` tag the front-end can branch on.
pub trait VigilErrorCode {
    /// Returns the error code string (e.g., "STORE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the response tag (e.g., "timeout", "query").
    fn error_type(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the gateway boundary.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const INVALID_REFERENCE: &str = "INVALID_REFERENCE";
pub const INVALID_PAYLOAD: &str = "INVALID_PAYLOAD";
pub const STORE_ERROR: &str = "STORE_ERROR";
pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
pub const TIMEOUT: &str = "TIMEOUT";
pub const CONSISTENCY_VIOLATION: &str = "CONSISTENCY_VIOLATION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
