//! VigilError → failure fields of a response.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use vigil_core::errors::{VigilError, VigilErrorCode};

/// The `errorType`/`errors` pair every failed response carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl Failure {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_error(err: &VigilError) -> Self {
        Self {
            error_type: Some(err.error_type().to_string()),
            error_code: Some(err.error_code().to_string()),
            errors: Some(vec![err.to_string()]),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error_type.is_some()
    }
}

/// A command the dispatcher does not know, or arguments it cannot read.
pub fn bad_request(reason: impl Into<String>) -> VigilError {
    VigilError::invalid_payload(reason)
}
