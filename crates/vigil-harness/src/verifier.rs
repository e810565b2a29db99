//! FlowVerifier: setup → save → fetch → validate → cleanup against a
//! disposable analysis, through the same engine the gateway uses.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use vigil_core::config::HarnessConfig;
use vigil_core::constants::MAX_BATCH_SIZE;
use vigil_core::errors::{StorageError, VigilError, VigilResult};
use vigil_core::models::{
    ComponentHealth, FlowMetrics, FlowPhase, FlowPhases, FlowVerificationResult, HealthStatus,
    PhaseResult,
};
use vigil_core::records::{AnalysisId, RecommendationInput};
use vigil_core::traits::IRecommendationStorage;
use vigil_observability::tracing_setup::events;
use vigil_persistence::PersistenceEngine;
use vigil_validation::ConsistencyAuditor;

use crate::synthetic::{external_ids, synthetic_batch};

pub struct FlowVerifier {
    engine: Arc<PersistenceEngine>,
    config: HarnessConfig,
}

impl FlowVerifier {
    pub fn new(engine: Arc<PersistenceEngine>, config: HarnessConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// One run with the configured record count.
    pub async fn run(&self) -> FlowVerificationResult {
        self.run_with(self.config.record_count).await
    }

    /// One run writing `record_count` synthetic records. Never returns an
    /// error: every failure lands in the phase that hit it.
    pub async fn run_with(&self, record_count: usize) -> FlowVerificationResult {
        let run = Run::new(record_count, self.config.max_duration_ms);
        tracing::info!(run_id = %run.id, record_count, "flow verification started");
        let result = self.drive(run).await;
        if result.success {
            tracing::info!(
                run_id = %result.run_id,
                total_time_ms = result.metrics.total_time_ms,
                integrity_score = result.metrics.integrity_score,
                "flow verification passed"
            );
        } else {
            tracing::warn!(
                run_id = %result.run_id,
                errors = ?result.all_errors(),
                "flow verification failed"
            );
        }
        result
    }

    /// Run once and fold the report into a probe result named `flow`.
    pub async fn run_as_probe(&self) -> ComponentHealth {
        let result = self.run().await;
        let (status, message) = if result.success {
            (
                HealthStatus::Healthy,
                format!(
                    "{} records round-tripped in {}ms",
                    result.metrics.record_count, result.metrics.total_time_ms
                ),
            )
        } else {
            (HealthStatus::Critical, result.all_errors().join("; "))
        };
        ComponentHealth {
            name: "flow".to_string(),
            status,
            response_time_ms: result.metrics.total_time_ms,
            message: Some(message),
        }
    }

    async fn drive(&self, mut run: Run) -> FlowVerificationResult {
        if run.record_count > MAX_BATCH_SIZE {
            let setup = run.begin(FlowPhase::Setup);
            run.finish(
                setup,
                vec![format!(
                    "record count {} exceeds the maximum batch of {MAX_BATCH_SIZE}",
                    run.record_count
                )],
            );
            run.skip_remaining(FlowPhase::Setup);
            run.phases.cleanup = PhaseResult::skipped("no analysis was created");
            return run.into_result(None);
        }

        let batch = synthetic_batch(&run.id, run.record_count);
        let expected_ids = external_ids(&batch);

        // --- Setup ---
        let label = format!("flow-verification {}", run.id);
        let setup = run.begin(FlowPhase::Setup);
        let analysis_id = match self
            .blocking(move |storage| storage.create_analysis(&label, None))
            .await
        {
            Ok(id) => {
                run.finish(setup, Vec::new());
                Some(id)
            }
            Err(e) => {
                run.finish(setup, vec![format!("could not create analysis: {e}")]);
                None
            }
        };

        if let Some(analysis_id) = analysis_id {
            self.exercise(&mut run, analysis_id, batch, &expected_ids).await;
            self.cleanup(&mut run, analysis_id).await;
        } else {
            run.skip_remaining(FlowPhase::Setup);
            run.phases.cleanup = PhaseResult::skipped("no analysis was created");
        }

        run.into_result(analysis_id)
    }

    /// Save, fetch and validate; each runs only if the previous passed.
    async fn exercise(
        &self,
        run: &mut Run,
        analysis_id: AnalysisId,
        batch: Vec<RecommendationInput>,
        expected_ids: &[String],
    ) {
        let n = run.record_count;

        // --- Save ---
        let save = run.begin(FlowPhase::Save);
        let mut errors = run.budget_errors(FlowPhase::Save);
        if errors.is_empty() {
            match self.engine.save(analysis_id, batch).await {
                Ok(outcome) => {
                    if outcome.saved_count != n {
                        errors.push(format!("saved {} of {n} records", outcome.saved_count));
                    }
                    if !outcome.verification.verified {
                        errors.push(format!(
                            "post-write verification found {} of {}",
                            outcome.verification.actual_count,
                            outcome.verification.expected_count
                        ));
                        errors.extend(outcome.verification.issues);
                    }
                }
                Err(e) => errors.push(e.to_string()),
            }
        }
        run.metrics.save_time_ms = run.finish(save, errors);
        if !run.phases.save.success {
            run.skip_remaining(FlowPhase::Save);
            return;
        }

        // --- Fetch ---
        let fetch = run.begin(FlowPhase::Fetch);
        let mut errors = run.budget_errors(FlowPhase::Fetch);
        if errors.is_empty() {
            match self.engine.fetch(analysis_id).await {
                Ok(outcome) if outcome.metadata.total_count != n => errors.push(format!(
                    "fetched {} of {n} records",
                    outcome.metadata.total_count
                )),
                Ok(_) => {}
                Err(e) => errors.push(e.to_string()),
            }
        }
        run.metrics.fetch_time_ms = run.finish(fetch, errors);
        if !run.phases.fetch.success {
            run.skip_remaining(FlowPhase::Fetch);
            return;
        }

        // --- Validate ---
        let validate = run.begin(FlowPhase::Validate);
        let mut errors = run.budget_errors(FlowPhase::Validate);
        if errors.is_empty() {
            let ids = expected_ids.to_vec();
            let audit = self
                .blocking(move |storage| {
                    ConsistencyAuditor::new(storage).audit_expected_ids(analysis_id, &ids)
                })
                .await;
            match audit {
                Ok(report) => {
                    run.metrics.integrity_score = report.integrity_score;
                    if !report.is_consistent {
                        errors.push(format!(
                            "audit inconsistent: expected {}, found {}, integrity {}",
                            report.expected_count, report.actual_count, report.integrity_score
                        ));
                        errors.extend(report.missing.iter().map(|id| format!("missing {id}")));
                        errors.extend(
                            report.unexpected.iter().map(|id| format!("unexpected {id}")),
                        );
                        errors.extend(report.corrupted.iter().map(|c| {
                            format!("corrupted {}: {}", c.external_id, c.issues.join(", "))
                        }));
                    }
                }
                Err(e) => errors.push(format!("audit failed: {e}")),
            }
        }
        // The run as a whole must also fit the budget.
        if errors.is_empty() {
            if let Some(overrun) = run.overrun() {
                errors.push(overrun);
            }
        }
        run.finish(validate, errors);
    }

    /// Remove the synthetic rows and the analysis. Failure is logged and
    /// reported, but never changes the overall verdict.
    async fn cleanup(&self, run: &mut Run, analysis_id: AnalysisId) {
        let cleanup = run.begin(FlowPhase::Cleanup);
        let mut errors = Vec::new();
        if let Err(e) = self.engine.delete_for_analysis(analysis_id).await {
            errors.push(format!("delete rows: {e}"));
        }
        if let Err(e) = self
            .blocking(move |storage| storage.delete_analysis(analysis_id))
            .await
        {
            errors.push(format!("delete analysis: {e}"));
        }
        for error in &errors {
            events::flow_cleanup_failed(&run.id, analysis_id.value(), error);
        }
        run.finish(cleanup, errors);
    }

    async fn blocking<T, F>(&self, f: F) -> VigilResult<T>
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn IRecommendationStorage>) -> VigilResult<T> + Send + 'static,
    {
        let storage = Arc::clone(self.engine.storage());
        tokio::task::spawn_blocking(move || f(storage))
            .await
            .map_err(|e| {
                VigilError::from(StorageError::SqliteError {
                    message: format!("harness task failed: {e}"),
                })
            })?
    }
}

/// Mutable state of one run.
struct Run {
    id: String,
    record_count: usize,
    budget_ms: u64,
    started_at: chrono::DateTime<Utc>,
    start: Instant,
    phases: FlowPhases,
    metrics: FlowMetrics,
}

/// A phase in progress.
struct PhaseStart {
    phase: FlowPhase,
    at: Instant,
}

impl Run {
    fn new(record_count: usize, budget_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            record_count,
            budget_ms,
            started_at: Utc::now(),
            start: Instant::now(),
            phases: FlowPhases::default(),
            metrics: FlowMetrics {
                record_count,
                ..FlowMetrics::default()
            },
        }
    }

    fn begin(&self, phase: FlowPhase) -> PhaseStart {
        PhaseStart {
            phase,
            at: Instant::now(),
        }
    }

    /// Close a phase; it succeeds when `errors` is empty. Returns its duration.
    fn finish(&mut self, started: PhaseStart, errors: Vec<String>) -> u64 {
        let duration_ms = started.at.elapsed().as_millis() as u64;
        let success = errors.is_empty();
        *self.phases.get_mut(started.phase) = PhaseResult {
            success,
            duration_ms,
            errors,
            skipped: false,
        };
        events::flow_phase_completed(&self.id, started.phase.as_str(), success, duration_ms);
        duration_ms
    }

    /// Mark every functional phase after `failed` as skipped.
    fn skip_remaining(&mut self, failed: FlowPhase) {
        let order = [FlowPhase::Setup, FlowPhase::Save, FlowPhase::Fetch, FlowPhase::Validate];
        let reason = format!("{} failed", failed.as_str());
        for phase in order.into_iter().skip_while(|p| *p != failed).skip(1) {
            *self.phases.get_mut(phase) = PhaseResult::skipped(reason.clone());
        }
    }

    fn overrun(&self) -> Option<String> {
        let elapsed = self.start.elapsed().as_millis() as u64;
        (elapsed > self.budget_ms)
            .then(|| format!("run took {elapsed}ms, over its {}ms budget", self.budget_ms))
    }

    /// A single error when the budget ran out before `phase` could start.
    fn budget_errors(&self, phase: FlowPhase) -> Vec<String> {
        self.overrun()
            .map(|o| vec![format!("{} not started: {o}", phase.as_str())])
            .unwrap_or_default()
    }

    fn into_result(self, analysis_id: Option<AnalysisId>) -> FlowVerificationResult {
        let mut metrics = self.metrics;
        metrics.total_time_ms = self.start.elapsed().as_millis() as u64;
        FlowVerificationResult {
            run_id: self.id,
            analysis_id: analysis_id.map(AnalysisId::value),
            success: self.phases.functional_success(),
            phases: self.phases,
            metrics,
            started_at: self.started_at,
            completed_at: Utc::now(),
        }
    }
}
