use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::verification::VerificationResult;
use crate::constants;
use crate::records::{AnalysisId, RecommendationRow};

/// Result of a save that reached (or deliberately skipped) the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    pub analysis_id: AnalysisId,
    pub saved_count: usize,
    /// Store-assigned ids, in insertion order.
    pub record_ids: Vec<i64>,
    /// True when the batch was empty and the store was not touched.
    pub nothing_to_save: bool,
    pub verification: VerificationResult,
    pub duration_ms: u64,
}

impl SaveOutcome {
    pub fn message(&self) -> String {
        if self.nothing_to_save {
            "No recommendations to save".to_string()
        } else if self.verification.verified {
            format!(
                "Saved {} recommendation(s) for analysis {}",
                self.saved_count, self.analysis_id
            )
        } else {
            format!(
                "Saved {} recommendation(s) for analysis {} but verification found {} of {}",
                self.saved_count,
                self.analysis_id,
                self.verification.actual_count,
                self.verification.expected_count
            )
        }
    }
}

/// Qualitative rating of a fetch latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PerformanceRating {
    pub fn from_millis(ms: u64) -> Self {
        if ms < constants::RATING_EXCELLENT_MS {
            Self::Excellent
        } else if ms < constants::RATING_GOOD_MS {
            Self::Good
        } else if ms < constants::RATING_FAIR_MS {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Metadata returned alongside fetched rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FetchMetadata {
    pub analysis_id: AnalysisId,
    pub total_count: usize,
    pub fetch_timestamp: DateTime<Utc>,
    pub fetch_time_ms: u64,
    pub rating: PerformanceRating,
    /// Attempts made, including the first.
    pub attempts: u32,
}

/// Successful fetch. An empty `recommendations` list means the analysis has
/// none; a failed fetch is an `Err`, never an empty outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutcome {
    pub recommendations: Vec<RecommendationRow>,
    pub metadata: FetchMetadata,
}
