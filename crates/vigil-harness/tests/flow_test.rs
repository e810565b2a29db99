//! Flow verification against real and faulty stores.

use std::sync::Arc;
use std::time::Duration;

use test_fixtures::FaultyStore;
use vigil_core::config::{HarnessConfig, PersistenceConfig};
use vigil_core::constants::MAX_BATCH_SIZE;
use vigil_core::models::HealthStatus;
use vigil_core::records::AnalysisId;
use vigil_core::traits::IRecommendationStorage;
use vigil_harness::FlowVerifier;
use vigil_observability::HealthMonitor;
use vigil_persistence::PersistenceEngine;
use vigil_storage::StorageEngine;

fn fast_persistence() -> PersistenceConfig {
    PersistenceConfig {
        fetch_timeout_ms: 2_000,
        max_retries: 1,
        initial_backoff_ms: 1,
        max_backoff_ms: 2,
        verify_after_save: true,
    }
}

fn verifier_over(
    storage: Arc<dyn IRecommendationStorage>,
    harness: HarnessConfig,
) -> (FlowVerifier, Arc<HealthMonitor>) {
    let monitor = Arc::new(HealthMonitor::default());
    let engine = Arc::new(PersistenceEngine::new(
        storage,
        monitor.clone(),
        fast_persistence(),
    ));
    (FlowVerifier::new(engine, harness), monitor)
}

fn default_harness() -> HarnessConfig {
    HarnessConfig {
        record_count: 10,
        max_duration_ms: 30_000,
    }
}

#[tokio::test]
async fn ten_records_pass_every_phase() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let (verifier, _) = verifier_over(store.clone(), default_harness());

    let report = verifier.run().await;

    assert!(report.success, "errors: {:?}", report.all_errors());
    assert!(report.phases.setup.success);
    assert!(report.phases.save.success);
    assert!(report.phases.fetch.success);
    assert!(report.phases.validate.success);
    assert!(report.phases.cleanup.success);
    assert_eq!(report.metrics.record_count, 10);
    assert_eq!(report.metrics.integrity_score, 100);
    assert!(report.completed_at >= report.started_at);
    assert!(report.all_errors().is_empty());
}

#[tokio::test]
async fn cleanup_leaves_nothing_behind() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let (verifier, _) = verifier_over(store.clone(), default_harness());

    let report = verifier.run().await;
    assert!(report.success);

    let analysis = AnalysisId::new(report.analysis_id.unwrap()).unwrap();
    assert!(!store.analysis_exists(analysis).unwrap());
    assert_eq!(store.total_recommendations().unwrap(), 0);
}

#[tokio::test]
async fn runs_do_not_disturb_other_analyses() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let kept = store.create_analysis("production", None).unwrap();
    store
        .insert_batch(kept, &test_fixtures::make_validated_batch(4))
        .unwrap();
    let (verifier, _) = verifier_over(store.clone(), default_harness());

    assert!(verifier.run().await.success);
    assert!(verifier.run_with(3).await.success);

    assert_eq!(store.count_by_analysis(kept).unwrap(), 4);
    assert_eq!(store.total_recommendations().unwrap(), 4);
}

#[tokio::test]
async fn engine_operations_are_recorded_as_metrics() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let (verifier, monitor) = verifier_over(store, default_harness());

    verifier.run().await;

    let stats = monitor.performance_stats();
    assert_eq!(stats.operations_by_type.save, 1);
    assert_eq!(stats.operations_by_type.fetch, 1);
    assert_eq!(stats.operations_by_type.delete, 1);
    assert_eq!(stats.success_rate, 1.0);
}

#[tokio::test]
async fn failed_save_skips_later_phases_but_still_cleans_up() {
    let inner = Arc::new(StorageEngine::open_in_memory().unwrap());
    let faulty = Arc::new(FaultyStore::wrap(inner.clone()).failing_inserts());
    let (verifier, _) = verifier_over(faulty, default_harness());

    let report = verifier.run().await;

    assert!(!report.success);
    assert!(report.phases.setup.success);
    assert!(!report.phases.save.success);
    assert!(report.phases.fetch.skipped);
    assert!(report.phases.validate.skipped);
    assert!(report.phases.cleanup.success);
    assert!(report.all_errors().iter().any(|e| e.starts_with("save: ")));

    let analysis = AnalysisId::new(report.analysis_id.unwrap()).unwrap();
    assert!(!inner.analysis_exists(analysis).unwrap());
}

#[tokio::test]
async fn unreachable_store_fails_setup() {
    let inner = Arc::new(StorageEngine::open_in_memory().unwrap());
    let faulty = Arc::new(FaultyStore::wrap(inner).unreachable());
    let (verifier, _) = verifier_over(faulty, default_harness());

    let report = verifier.run().await;

    assert!(!report.success);
    assert!(report.analysis_id.is_none());
    assert!(!report.phases.setup.success);
    assert!(report.phases.save.skipped);
    assert!(report.phases.cleanup.skipped);
}

#[tokio::test]
async fn exceeding_the_time_budget_fails_the_run() {
    let inner = Arc::new(StorageEngine::open_in_memory().unwrap());
    let slow = Arc::new(FaultyStore::wrap(inner.clone()).slow_fetches(Duration::from_millis(60)));
    let harness = HarnessConfig {
        record_count: 5,
        max_duration_ms: 20,
    };
    let (verifier, _) = verifier_over(slow, harness);

    let report = verifier.run().await;

    assert!(!report.success);
    assert!(report
        .all_errors()
        .iter()
        .any(|e| e.contains("over its 20ms budget")));
    // Cleanup still ran.
    assert_eq!(inner.total_recommendations().unwrap(), 0);
}

#[tokio::test]
async fn probe_reports_healthy_and_critical() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let (verifier, _) = verifier_over(store.clone(), default_harness());
    let probe = verifier.run_as_probe().await;
    assert_eq!(probe.name, "flow");
    assert_eq!(probe.status, HealthStatus::Healthy);

    let faulty = Arc::new(FaultyStore::wrap(store).failing_inserts());
    let (broken, _) = verifier_over(faulty, default_harness());
    let probe = broken.run_as_probe().await;
    assert_eq!(probe.status, HealthStatus::Critical);
    assert!(probe.message.unwrap().contains("save: "));
}

#[tokio::test]
async fn report_serializes_in_camel_case() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let (verifier, _) = verifier_over(store, default_harness());
    let report = verifier.run_with(2).await;

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["metrics"]["recordCount"], 2);
    assert!(json["phases"]["save"]["durationMs"].is_u64());
    assert!(json["runId"].is_string());
}

#[tokio::test]
async fn oversized_record_count_fails_setup_without_touching_the_store() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let (verifier, monitor) = verifier_over(store.clone(), default_harness());

    for count in [MAX_BATCH_SIZE + 1, usize::MAX] {
        let report = verifier.run_with(count).await;
        assert!(!report.success);
        assert!(report.analysis_id.is_none());
        assert!(!report.phases.setup.success);
        assert!(report.phases.setup.errors[0].contains("exceeds the maximum batch"));
        assert!(report.phases.save.skipped);
        assert!(report.phases.cleanup.skipped);
    }
    assert!(monitor.is_empty());
    assert_eq!(store.total_recommendations().unwrap(), 0);
}

#[tokio::test]
async fn largest_allowed_batch_still_passes() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let (verifier, _) = verifier_over(store, default_harness());

    let report = verifier.run_with(MAX_BATCH_SIZE).await;
    assert!(report.success, "errors: {:?}", report.all_errors());
    assert_eq!(report.metrics.integrity_score, 100);
}
