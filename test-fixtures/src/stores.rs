//! Store wrappers that inject faults in front of a real store.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use vigil_core::errors::{StorageError, VigilError, VigilResult};
use vigil_core::records::{
    AnalysisId, AnalysisRecord, RecommendationRow, RecommendationStatus, ValidatedRecommendation,
};
use vigil_core::traits::IRecommendationStorage;

/// Delegates to `inner` unless told to fail or stall.
pub struct FaultyStore {
    inner: Arc<dyn IRecommendationStorage>,
    /// Remaining fetches that fail as unavailable before one succeeds.
    transient_fetch_failures: AtomicU32,
    fetch_delay: Duration,
    fail_inserts: bool,
    unreachable: bool,
    fetch_calls: AtomicU32,
}

impl FaultyStore {
    pub fn wrap(inner: Arc<dyn IRecommendationStorage>) -> Self {
        Self {
            inner,
            transient_fetch_failures: AtomicU32::new(0),
            fetch_delay: Duration::ZERO,
            fail_inserts: false,
            unreachable: false,
            fetch_calls: AtomicU32::new(0),
        }
    }

    /// The next `n` fetches fail with a busy database.
    pub fn failing_fetches(self, n: u32) -> Self {
        self.transient_fetch_failures.store(n, Ordering::SeqCst);
        self
    }

    /// Every fetch sleeps first.
    pub fn slow_fetches(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Every insert fails with a non-transient store error after touching nothing.
    pub fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    /// Every call fails as unavailable.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn fetch_calls(&self) -> u32 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn gate(&self) -> VigilResult<()> {
        if self.unreachable {
            return Err(busy());
        }
        Ok(())
    }
}

fn busy() -> VigilError {
    StorageError::ConnectionUnavailable {
        reason: "database is locked".into(),
    }
    .into()
}

impl IRecommendationStorage for FaultyStore {
    fn create_analysis(&self, label: &str, explicit_id: Option<i64>) -> VigilResult<AnalysisId> {
        self.gate()?;
        self.inner.create_analysis(label, explicit_id)
    }

    fn get_analysis(&self, id: AnalysisId) -> VigilResult<Option<AnalysisRecord>> {
        self.gate()?;
        self.inner.get_analysis(id)
    }

    fn analysis_exists(&self, id: AnalysisId) -> VigilResult<bool> {
        self.gate()?;
        self.inner.analysis_exists(id)
    }

    fn delete_analysis(&self, id: AnalysisId) -> VigilResult<bool> {
        self.gate()?;
        self.inner.delete_analysis(id)
    }

    fn insert_batch(
        &self,
        analysis_id: AnalysisId,
        records: &[ValidatedRecommendation],
    ) -> VigilResult<Vec<i64>> {
        self.gate()?;
        if self.fail_inserts {
            return Err(StorageError::TransactionFailed {
                stage: "insert record 0".into(),
                message: "disk I/O error".into(),
            }
            .into());
        }
        self.inner.insert_batch(analysis_id, records)
    }

    fn fetch_by_analysis(&self, analysis_id: AnalysisId) -> VigilResult<Vec<RecommendationRow>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.gate()?;
        if !self.fetch_delay.is_zero() {
            std::thread::sleep(self.fetch_delay);
        }
        let remaining = self.transient_fetch_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_fetch_failures
                .store(remaining - 1, Ordering::SeqCst);
            return Err(busy());
        }
        self.inner.fetch_by_analysis(analysis_id)
    }

    fn count_by_analysis(&self, analysis_id: AnalysisId) -> VigilResult<usize> {
        self.gate()?;
        self.inner.count_by_analysis(analysis_id)
    }

    fn get_recommendation(&self, record_id: i64) -> VigilResult<Option<RecommendationRow>> {
        self.gate()?;
        self.inner.get_recommendation(record_id)
    }

    fn update_status(&self, record_id: i64, status: RecommendationStatus) -> VigilResult<bool> {
        self.gate()?;
        self.inner.update_status(record_id, status)
    }

    fn delete_by_analysis(&self, analysis_id: AnalysisId) -> VigilResult<usize> {
        self.gate()?;
        self.inner.delete_by_analysis(analysis_id)
    }

    fn ping(&self) -> VigilResult<()> {
        self.gate()?;
        self.inner.ping()
    }

    fn total_recommendations(&self) -> VigilResult<usize> {
        self.gate()?;
        self.inner.total_recommendations()
    }

    fn integrity_check(&self) -> VigilResult<Vec<String>> {
        self.gate()?;
        self.inner.integrity_check()
    }
}
