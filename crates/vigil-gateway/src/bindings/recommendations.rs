//! Recommendation bindings: save, get, update status, audit.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use vigil_core::errors::{StorageError, VigilError, VigilResult};
use vigil_core::models::{PerformanceRating, VerificationResult};
use vigil_core::records::AnalysisId;
use vigil_validation::ConsistencyAuditor;

use crate::conversions::error_types::{bad_request, Failure};
use crate::conversions::recommendation_types::{rows_to_views, RecommendationView};
use crate::conversions::response_types::{
    AuditResponse, FetchPerformance, GetMetadata, GetResponse, SaveResponse,
    StatusUpdateResponse,
};
use crate::runtime::VigilRuntime;

/// `saveRecommendations(analysisId, records)`.
pub async fn save_recommendations(
    rt: &VigilRuntime,
    analysis_id: &Value,
    records: &Value,
) -> SaveResponse {
    match rt.persistence.save_raw(analysis_id, records).await {
        Ok(outcome) => SaveResponse {
            success: true,
            saved_count: outcome.saved_count,
            analysis_id: Some(outcome.analysis_id.value()),
            message: outcome.message(),
            verification_result: outcome.verification,
            failure: Failure::none(),
        },
        Err(e) => {
            let expected_count = records.as_array().map_or(0, Vec::len);
            SaveResponse {
                success: false,
                saved_count: 0,
                analysis_id: parsed_id(analysis_id),
                verification_result: VerificationResult {
                    expected_count,
                    actual_count: 0,
                    verified: false,
                    issues: Vec::new(),
                },
                message: e.to_string(),
                failure: Failure::from_error(&e),
            }
        }
    }
}

/// `getRecommendations(analysisId)`.
pub async fn get_recommendations(rt: &VigilRuntime, analysis_id: &Value) -> GetResponse {
    match rt.persistence.fetch_raw(analysis_id).await {
        Ok(outcome) => {
            let meta = outcome.metadata;
            GetResponse {
                success: true,
                recommendations: rows_to_views(outcome.recommendations),
                metadata: GetMetadata {
                    analysis_id: Some(meta.analysis_id.value()),
                    total_count: meta.total_count,
                    fetch_timestamp: meta.fetch_timestamp,
                    performance: FetchPerformance {
                        fetch_time_ms: meta.fetch_time_ms,
                        rating: meta.rating,
                    },
                },
                failure: Failure::none(),
            }
        }
        Err(e) => GetResponse {
            success: false,
            recommendations: Vec::new(),
            metadata: GetMetadata {
                analysis_id: parsed_id(analysis_id),
                total_count: 0,
                fetch_timestamp: Utc::now(),
                performance: FetchPerformance {
                    fetch_time_ms: 0,
                    rating: PerformanceRating::Poor,
                },
            },
            failure: Failure::from_error(&e),
        },
    }
}

/// `updateRecommendationStatus(recordId, status)`.
pub async fn update_recommendation_status(
    rt: &VigilRuntime,
    record_id: &Value,
    status: &Value,
) -> StatusUpdateResponse {
    match rt.persistence.update_status_raw(record_id, status).await {
        Ok(row) => StatusUpdateResponse {
            success: true,
            recommendation: Some(RecommendationView::from(row)),
            failure: Failure::none(),
        },
        Err(e) => StatusUpdateResponse {
            success: false,
            recommendation: None,
            failure: Failure::from_error(&e),
        },
    }
}

/// `auditRecommendations(analysisId, expected)`. `expected` is either a
/// count or a list of external ids.
pub async fn audit_recommendations(
    rt: &VigilRuntime,
    analysis_id: &Value,
    expected: &Value,
) -> AuditResponse {
    match run_audit(rt, analysis_id, expected).await {
        Ok(result) => AuditResponse {
            success: true,
            result: Some(result),
            failure: Failure::none(),
        },
        Err(e) => AuditResponse {
            success: false,
            result: None,
            failure: Failure::from_error(&e),
        },
    }
}

async fn run_audit(
    rt: &VigilRuntime,
    analysis_id: &Value,
    expected: &Value,
) -> VigilResult<vigil_core::models::ConsistencyResult> {
    let analysis_id = AnalysisId::from_value(analysis_id)?;
    let auditor = ConsistencyAuditor::new(Arc::clone(&rt.storage));
    let task = match expected {
        Value::Number(n) => {
            let count = n
                .as_u64()
                .ok_or_else(|| bad_request(format!("expected count {n} is not a count")))?
                as usize;
            tokio::task::spawn_blocking(move || auditor.audit(analysis_id, count))
        }
        Value::Array(items) => {
            let ids = items
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| bad_request("expected ids must be strings"))
                })
                .collect::<VigilResult<Vec<_>>>()?;
            tokio::task::spawn_blocking(move || auditor.audit_expected_ids(analysis_id, &ids))
        }
        _ => {
            return Err(bad_request(
                "expected must be a record count or a list of external ids",
            ))
        }
    };
    task.await.map_err(|e| {
        VigilError::from(StorageError::SqliteError {
            message: format!("audit task failed: {e}"),
        })
    })?
}

fn parsed_id(raw: &Value) -> Option<i64> {
    AnalysisId::from_value(raw).ok().map(AnalysisId::value)
}
