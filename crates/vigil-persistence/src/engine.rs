//! PersistenceEngine: save, fetch, status update and teardown of
//! recommendations, each recording exactly one health metric.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;

use vigil_core::config::PersistenceConfig;
use vigil_core::errors::{StorageError, ValidationError, VigilError, VigilErrorCode, VigilResult};
use vigil_core::models::{
    FetchMetadata, FetchOutcome, HealthMetric, OperationType, PerformanceRating, SaveOutcome,
    VerificationResult,
};
use vigil_core::records::analysis_id::json_kind;
use vigil_core::records::{AnalysisId, RecommendationInput, RecommendationRow, RecommendationStatus};
use vigil_core::traits::IRecommendationStorage;
use vigil_observability::tracing_setup::events;
use vigil_observability::HealthMonitor;
use vigil_validation::PostWriteVerifier;

use crate::retry::RetryPolicy;
use crate::validate::{parse_batch, validate_batch};

pub struct PersistenceEngine {
    storage: Arc<dyn IRecommendationStorage>,
    monitor: Arc<HealthMonitor>,
    config: PersistenceConfig,
    retry: RetryPolicy,
    /// Held for the whole write (and its verification) so saves never overlap.
    write_gate: Mutex<()>,
}

impl PersistenceEngine {
    pub fn new(
        storage: Arc<dyn IRecommendationStorage>,
        monitor: Arc<HealthMonitor>,
        config: PersistenceConfig,
    ) -> Self {
        let retry = RetryPolicy::from_config(&config);
        Self {
            storage,
            monitor,
            config,
            retry,
            write_gate: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &Arc<dyn IRecommendationStorage> {
        &self.storage
    }

    pub fn monitor(&self) -> &Arc<HealthMonitor> {
        &self.monitor
    }

    // --- Save ---

    /// Validate and write a batch for one analysis.
    pub async fn save(
        &self,
        analysis_id: AnalysisId,
        records: Vec<RecommendationInput>,
    ) -> VigilResult<SaveOutcome> {
        let start = Instant::now();
        let result = self.save_batch(analysis_id, records, start).await;
        self.finish_save(start, Some(analysis_id.value()), &result);
        result
    }

    /// Same as [`save`](Self::save) with both arguments as they arrive across
    /// the gateway.
    pub async fn save_raw(&self, analysis_id: &Value, records: &Value) -> VigilResult<SaveOutcome> {
        let start = Instant::now();
        let parsed = AnalysisId::from_value(analysis_id)
            .and_then(|id| parse_batch(records).map(|inputs| (id, inputs)));
        let result = match parsed {
            Ok((id, inputs)) => self.save_batch(id, inputs, start).await,
            Err(e) => Err(e),
        };
        let hint = AnalysisId::from_value(analysis_id).ok().map(AnalysisId::value);
        self.finish_save(start, hint, &result);
        result
    }

    async fn save_batch(
        &self,
        analysis_id: AnalysisId,
        records: Vec<RecommendationInput>,
        start: Instant,
    ) -> VigilResult<SaveOutcome> {
        if records.is_empty() {
            self.blocking(move |storage| require_analysis(storage.as_ref(), analysis_id))
                .await?;
            return Ok(SaveOutcome {
                analysis_id,
                saved_count: 0,
                record_ids: Vec::new(),
                nothing_to_save: true,
                verification: VerificationResult::trivially_verified(),
                duration_ms: elapsed_ms(start),
            });
        }

        let validated = validate_batch(records)?;
        let expected = validated.len();

        let _gate = self.write_gate.lock().await;
        let record_ids = self
            .blocking(move |storage| {
                require_analysis(storage.as_ref(), analysis_id)?;
                storage.insert_batch(analysis_id, &validated)
            })
            .await?;

        let verification = if self.config.verify_after_save {
            let ids = record_ids.clone();
            self.blocking(move |storage| {
                Ok(PostWriteVerifier::new(storage).verify(analysis_id, &ids, expected))
            })
            .await
            .unwrap_or_else(|e| VerificationResult {
                expected_count: expected,
                actual_count: 0,
                verified: false,
                issues: vec![format!("verification did not run: {e}")],
            })
        } else {
            VerificationResult {
                expected_count: expected,
                actual_count: record_ids.len(),
                verified: record_ids.len() == expected,
                issues: Vec::new(),
            }
        };

        Ok(SaveOutcome {
            analysis_id,
            saved_count: record_ids.len(),
            record_ids,
            nothing_to_save: false,
            verification,
            duration_ms: elapsed_ms(start),
        })
    }

    fn finish_save(&self, start: Instant, analysis_id: Option<i64>, result: &VigilResult<SaveOutcome>) {
        let duration_ms = elapsed_ms(start);
        match result {
            Ok(outcome) => {
                if !outcome.nothing_to_save {
                    events::recommendations_saved(
                        outcome.analysis_id.value(),
                        outcome.saved_count,
                        duration_ms,
                    );
                }
            }
            Err(e) if is_store_failure(e) => {
                tracing::error!(analysis_id = ?analysis_id, error = %e, "save failed in the store");
            }
            Err(e) => events::save_rejected(analysis_id, e.error_type(), &e.to_string()),
        }
        let count = result.as_ref().map(|o| o.saved_count);
        self.record(OperationType::Save, duration_ms, analysis_id, count);
    }

    // --- Fetch ---

    /// All recommendations of an analysis in creation order. An analysis with
    /// no records (or no row at all) yields an empty success.
    pub async fn fetch(&self, analysis_id: AnalysisId) -> VigilResult<FetchOutcome> {
        let start = Instant::now();
        let result = self.fetch_timed(analysis_id, start).await;
        let count = result.as_ref().map(|o| o.metadata.total_count);
        self.record(OperationType::Fetch, elapsed_ms(start), Some(analysis_id.value()), count);
        result
    }

    pub async fn fetch_raw(&self, analysis_id: &Value) -> VigilResult<FetchOutcome> {
        let start = Instant::now();
        let result = match AnalysisId::from_value(analysis_id) {
            Ok(id) => self.fetch_timed(id, start).await,
            Err(e) => Err(e),
        };
        let hint = AnalysisId::from_value(analysis_id).ok().map(AnalysisId::value);
        let count = result.as_ref().map(|o| o.metadata.total_count);
        self.record(OperationType::Fetch, elapsed_ms(start), hint, count);
        result
    }

    async fn fetch_timed(&self, analysis_id: AnalysisId, start: Instant) -> VigilResult<FetchOutcome> {
        let budget = self.config.fetch_timeout();
        let attempt = self.retry.run(
            || self.blocking(move |storage| storage.fetch_by_analysis(analysis_id)),
            |attempt, backoff, e| {
                events::fetch_retry(
                    analysis_id.value(),
                    attempt,
                    backoff.as_millis() as u64,
                    &e.to_string(),
                )
            },
        );

        let (recommendations, attempts): (Vec<RecommendationRow>, u32) =
            match tokio::time::timeout(budget, attempt).await {
                Ok(result) => result?,
                Err(_) => {
                    // The blocking read keeps running; its result is dropped.
                    events::fetch_timeout(analysis_id.value(), self.config.fetch_timeout_ms);
                    return Err(VigilError::Timeout {
                        operation: "fetch".to_string(),
                        budget_ms: self.config.fetch_timeout_ms,
                    });
                }
            };

        let fetch_time_ms = elapsed_ms(start);
        Ok(FetchOutcome {
            metadata: FetchMetadata {
                analysis_id,
                total_count: recommendations.len(),
                fetch_timestamp: Utc::now(),
                fetch_time_ms,
                rating: PerformanceRating::from_millis(fetch_time_ms),
                attempts,
            },
            recommendations,
        })
    }

    // --- Update / delete ---

    /// Change the status of one record and return the updated row.
    pub async fn update_status(
        &self,
        record_id: i64,
        status: RecommendationStatus,
    ) -> VigilResult<RecommendationRow> {
        let start = Instant::now();
        let result = self.update_inner(record_id, status).await;
        let count = result.as_ref().map(|_| 1);
        self.record(OperationType::Update, elapsed_ms(start), None, count);
        result
    }

    pub async fn update_status_raw(
        &self,
        record_id: &Value,
        status: &Value,
    ) -> VigilResult<RecommendationRow> {
        let start = Instant::now();
        let result = match parse_status_args(record_id, status) {
            Ok((id, status)) => self.update_inner(id, status).await,
            Err(e) => Err(e),
        };
        let count = result.as_ref().map(|_| 1);
        self.record(OperationType::Update, elapsed_ms(start), None, count);
        result
    }

    async fn update_inner(
        &self,
        record_id: i64,
        status: RecommendationStatus,
    ) -> VigilResult<RecommendationRow> {
        if record_id <= 0 {
            return Err(VigilError::invalid_record_reference(format!(
                "{record_id} is not a positive integer"
            )));
        }
        let _gate = self.write_gate.lock().await;
        self.blocking(move |storage| {
            let missing = || {
                VigilError::invalid_record_reference(format!(
                    "recommendation {record_id} does not exist"
                ))
            };
            if !storage.update_status(record_id, status)? {
                return Err(missing());
            }
            storage.get_recommendation(record_id)?.ok_or_else(missing)
        })
        .await
    }

    /// Remove every recommendation of an analysis. Returns rows deleted.
    pub async fn delete_for_analysis(&self, analysis_id: AnalysisId) -> VigilResult<usize> {
        let start = Instant::now();
        let result = {
            let _gate = self.write_gate.lock().await;
            self.blocking(move |storage| storage.delete_by_analysis(analysis_id))
                .await
        };
        let count = result.as_ref().copied();
        self.record(OperationType::Delete, elapsed_ms(start), Some(analysis_id.value()), count);
        result
    }

    // --- Helpers ---

    /// Run a store call on the blocking pool.
    async fn blocking<T, F>(&self, f: F) -> VigilResult<T>
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn IRecommendationStorage>) -> VigilResult<T> + Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || f(storage))
            .await
            .map_err(|e| {
                VigilError::from(StorageError::SqliteError {
                    message: format!("store task failed: {e}"),
                })
            })?
    }

    fn record(
        &self,
        op: OperationType,
        duration_ms: u64,
        analysis_id: Option<i64>,
        result: Result<usize, &VigilError>,
    ) {
        let mut metric = match result {
            Ok(count) => HealthMetric::succeeded(op, duration_ms).with_record_count(count),
            Err(e) => HealthMetric::failed(op, duration_ms, e.to_string()),
        };
        if let Some(id) = analysis_id {
            metric = metric.for_analysis(id);
        }
        self.monitor.record_metric(metric);
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Saves, including empty ones, only target analyses that exist.
fn require_analysis(storage: &dyn IRecommendationStorage, analysis_id: AnalysisId) -> VigilResult<()> {
    if storage.analysis_exists(analysis_id)? {
        Ok(())
    } else {
        Err(VigilError::invalid_reference(format!(
            "analysis {analysis_id} does not exist"
        )))
    }
}

fn is_store_failure(e: &VigilError) -> bool {
    matches!(
        e,
        VigilError::Store(_) | VigilError::StoreUnavailable { .. } | VigilError::Timeout { .. }
    )
}

fn parse_status_args(record_id: &Value, status: &Value) -> VigilResult<(i64, RecommendationStatus)> {
    let id = match record_id {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        VigilError::invalid_record_reference(format!(
            "expected an integer, got {}",
            json_kind(record_id)
        ))
    })?;

    let label = id.to_string();
    let raw = status.as_str().ok_or_else(|| {
        ValidationError::new(
            0,
            label.clone(),
            "status",
            format!("must be a string, got {}", json_kind(status)),
        )
    })?;
    let status = raw
        .trim()
        .parse::<RecommendationStatus>()
        .map_err(|reason| ValidationError::new(0, label, "status", reason))?;
    Ok((id, status))
}
