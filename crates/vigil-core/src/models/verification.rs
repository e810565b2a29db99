use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Post-write check attached to every committed save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub expected_count: usize,
    pub actual_count: usize,
    pub verified: bool,
    /// Shape problems or read failures observed during the re-read.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl VerificationResult {
    /// Result for a batch with nothing to verify.
    pub fn trivially_verified() -> Self {
        Self {
            expected_count: 0,
            actual_count: 0,
            verified: true,
            issues: Vec::new(),
        }
    }
}
