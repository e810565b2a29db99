use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Effort, Payload, Priority, RecommendationStatus};

/// A recommendation exactly as it is stored.
///
/// Enumerated columns are kept as raw strings so that a row damaged outside
/// this layer is still readable and can be reported by the auditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRow {
    /// Store-assigned, never reused.
    pub id: i64,
    pub analysis_id: i64,
    pub external_id: String,
    pub title: String,
    pub priority: String,
    pub category: String,
    pub effort: String,
    pub status: String,
    pub payload: Payload,
    /// blake3 digest of `payload` taken at write time.
    pub payload_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

impl RecommendationRow {
    pub fn priority(&self) -> Option<Priority> {
        Priority::from_str(&self.priority).ok()
    }

    pub fn effort(&self) -> Option<Effort> {
        Effort::from_str(&self.effort).ok()
    }

    pub fn status(&self) -> Option<RecommendationStatus> {
        RecommendationStatus::from_str(&self.status).ok()
    }
}

/// A parent analysis. This layer only needs it to exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: i64,
    pub label: String,
    pub created_at: String,
}
