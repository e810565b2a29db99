use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A stored record that failed one or more structural checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CorruptedRecord {
    pub record_id: i64,
    pub external_id: String,
    pub issues: Vec<String>,
}

/// Outcome of a consistency audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyResult {
    pub analysis_id: i64,
    pub expected_count: usize,
    pub actual_count: usize,
    /// Expected external ids not found in the store.
    pub missing: Vec<String>,
    /// Stored external ids that were not expected.
    pub unexpected: Vec<String>,
    pub corrupted: Vec<CorruptedRecord>,
    /// 0–100.
    pub integrity_score: u32,
    pub is_consistent: bool,
    pub checked_at: DateTime<Utc>,
}
