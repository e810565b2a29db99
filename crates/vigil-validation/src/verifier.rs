//! PostWriteVerifier: immediate re-read after a committed save.
//!
//! A mismatch never undoes the commit. It is logged at warn and returned in
//! the save outcome.

use std::collections::HashSet;
use std::sync::Arc;

use vigil_core::models::VerificationResult;
use vigil_core::records::AnalysisId;
use vigil_core::traits::IRecommendationStorage;
use vigil_observability::tracing_setup::events;

use crate::checks::record_issues;

pub struct PostWriteVerifier {
    storage: Arc<dyn IRecommendationStorage>,
}

impl PostWriteVerifier {
    pub fn new(storage: Arc<dyn IRecommendationStorage>) -> Self {
        Self { storage }
    }

    /// Re-read the analysis and look for the rows this save created.
    ///
    /// Only `new_ids` are counted, so earlier batches for the same analysis
    /// do not affect the result. A failed re-read yields `verified: false`.
    pub fn verify(
        &self,
        analysis_id: AnalysisId,
        new_ids: &[i64],
        expected_count: usize,
    ) -> VerificationResult {
        let result = match self.storage.fetch_by_analysis(analysis_id) {
            Ok(rows) => {
                let wanted: HashSet<i64> = new_ids.iter().copied().collect();
                let mut actual_count = 0;
                let mut issues = Vec::new();
                for row in rows.iter().filter(|r| wanted.contains(&r.id)) {
                    actual_count += 1;
                    issues.extend(
                        record_issues(row)
                            .into_iter()
                            .map(|issue| format!("record {} ({}): {issue}", row.id, row.external_id)),
                    );
                }
                VerificationResult {
                    expected_count,
                    actual_count,
                    verified: actual_count == expected_count && issues.is_empty(),
                    issues,
                }
            }
            Err(e) => VerificationResult {
                expected_count,
                actual_count: 0,
                verified: false,
                issues: vec![format!("verification read failed: {e}")],
            },
        };

        if !result.verified {
            events::verification_mismatch(
                analysis_id.value(),
                result.expected_count,
                result.actual_count,
                &result.issues,
            );
        }
        result
    }
}
