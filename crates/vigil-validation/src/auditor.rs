//! ConsistencyAuditor: on-demand deep check of an analysis' stored rows.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use vigil_core::errors::VigilResult;
use vigil_core::models::{ConsistencyResult, CorruptedRecord};
use vigil_core::records::{AnalysisId, RecommendationRow};
use vigil_core::traits::IRecommendationStorage;
use vigil_observability::tracing_setup::events;

use crate::checks::record_issues;
use crate::scoring::integrity_score;

/// What the caller believes should be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Count(usize),
    /// External ids; the count is their number.
    Ids(Vec<String>),
}

impl Expectation {
    fn count(&self) -> usize {
        match self {
            Self::Count(n) => *n,
            Self::Ids(ids) => ids.len(),
        }
    }
}

pub struct ConsistencyAuditor {
    storage: Arc<dyn IRecommendationStorage>,
}

impl ConsistencyAuditor {
    pub fn new(storage: Arc<dyn IRecommendationStorage>) -> Self {
        Self { storage }
    }

    /// Fetch and check every record of the analysis against a count.
    pub fn audit(
        &self,
        analysis_id: AnalysisId,
        expected_count: usize,
    ) -> VigilResult<ConsistencyResult> {
        let rows = self.storage.fetch_by_analysis(analysis_id)?;
        Ok(audit_rows(analysis_id, &rows, &Expectation::Count(expected_count)))
    }

    /// Like [`audit`](Self::audit), also listing missing and unexpected
    /// external ids.
    pub fn audit_expected_ids(
        &self,
        analysis_id: AnalysisId,
        expected_ids: &[String],
    ) -> VigilResult<ConsistencyResult> {
        let rows = self.storage.fetch_by_analysis(analysis_id)?;
        Ok(audit_rows(
            analysis_id,
            &rows,
            &Expectation::Ids(expected_ids.to_vec()),
        ))
    }
}

/// The audit itself, over rows already read.
pub fn audit_rows(
    analysis_id: AnalysisId,
    rows: &[RecommendationRow],
    expectation: &Expectation,
) -> ConsistencyResult {
    let expected_count = expectation.count();
    let actual_count = rows.len();

    let corrupted: Vec<CorruptedRecord> = rows
        .iter()
        .filter_map(|row| {
            let issues = record_issues(row);
            (!issues.is_empty()).then(|| CorruptedRecord {
                record_id: row.id,
                external_id: row.external_id.clone(),
                issues,
            })
        })
        .collect();

    let (missing, unexpected) = match expectation {
        Expectation::Count(_) => (Vec::new(), Vec::new()),
        Expectation::Ids(ids) => diff_ids(ids, rows),
    };

    let integrity_score = integrity_score(expected_count, actual_count, corrupted.len());
    let is_consistent = expected_count == actual_count
        && corrupted.is_empty()
        && missing.is_empty()
        && unexpected.is_empty();

    if !corrupted.is_empty() {
        let ids: Vec<i64> = corrupted.iter().map(|c| c.record_id).collect();
        events::corruption_detected(analysis_id.value(), &ids, integrity_score);
    }

    ConsistencyResult {
        analysis_id: analysis_id.value(),
        expected_count,
        actual_count,
        missing,
        unexpected,
        corrupted,
        integrity_score,
        is_consistent,
        checked_at: Utc::now(),
    }
}

/// (expected but absent, stored but not expected), each in first-seen order.
fn diff_ids(expected: &[String], rows: &[RecommendationRow]) -> (Vec<String>, Vec<String>) {
    let stored: HashSet<&str> = rows.iter().map(|r| r.external_id.as_str()).collect();
    let wanted: HashSet<&str> = expected.iter().map(String::as_str).collect();

    let mut seen = HashSet::new();
    let missing = expected
        .iter()
        .filter(|id| !stored.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect();
    let unexpected = rows
        .iter()
        .map(|r| &r.external_id)
        .filter(|id| !wanted.contains(id.as_str()))
        .cloned()
        .collect();
    (missing, unexpected)
}
