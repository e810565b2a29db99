//! Response shapes of the boundary calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use vigil_core::models::{ConsistencyResult, PerformanceRating, VerificationResult};

use super::error_types::Failure;
use super::recommendation_types::RecommendationView;

/// Answer to `saveRecommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
    pub saved_count: usize,
    /// Null when the id could not be parsed.
    pub analysis_id: Option<i64>,
    pub verification_result: VerificationResult,
    pub message: String,
    #[serde(flatten)]
    pub failure: Failure,
}

/// Fetch latency as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FetchPerformance {
    pub fetch_time_ms: u64,
    pub rating: PerformanceRating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GetMetadata {
    pub analysis_id: Option<i64>,
    pub total_count: usize,
    pub fetch_timestamp: DateTime<Utc>,
    pub performance: FetchPerformance,
}

/// Answer to `getRecommendations`. An empty list with `success: true` means
/// the analysis has no recommendations; a failed fetch sets `errorType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GetResponse {
    pub success: bool,
    pub recommendations: Vec<RecommendationView>,
    pub metadata: GetMetadata,
    #[serde(flatten)]
    pub failure: Failure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub recommendation: Option<RecommendationView>,
    #[serde(flatten)]
    pub failure: Failure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub success: bool,
    pub result: Option<ConsistencyResult>,
    #[serde(flatten)]
    pub failure: Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HealthResetResponse {
    pub success: bool,
    pub message: String,
}
