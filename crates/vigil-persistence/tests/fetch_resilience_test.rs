//! Fetch retry, timeout and store-failure handling.

use std::sync::Arc;
use std::time::Duration;

use test_fixtures::{make_inputs, FaultyStore};
use vigil_core::config::PersistenceConfig;
use vigil_core::errors::{VigilError, VigilErrorCode};
use vigil_core::records::AnalysisId;
use vigil_core::traits::IRecommendationStorage;
use vigil_observability::HealthMonitor;
use vigil_persistence::PersistenceEngine;
use vigil_storage::StorageEngine;

fn fast_config() -> PersistenceConfig {
    PersistenceConfig {
        fetch_timeout_ms: 2_000,
        max_retries: 3,
        initial_backoff_ms: 1,
        max_backoff_ms: 5,
        verify_after_save: true,
    }
}

/// A seeded real store plus the analysis holding `n` records.
fn seeded_store(n: usize) -> (Arc<StorageEngine>, AnalysisId) {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let analysis = store.create_analysis("resilience", None).unwrap();
    store
        .insert_batch(analysis, &test_fixtures::make_validated_batch(n))
        .unwrap();
    (store, analysis)
}

fn engine_over(store: Arc<FaultyStore>, config: PersistenceConfig) -> (PersistenceEngine, Arc<HealthMonitor>) {
    let monitor = Arc::new(HealthMonitor::default());
    (PersistenceEngine::new(store, monitor.clone(), config), monitor)
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let (inner, analysis) = seeded_store(3);
    let faulty = Arc::new(FaultyStore::wrap(inner).failing_fetches(2));
    let (engine, monitor) = engine_over(faulty.clone(), fast_config());

    let fetched = engine.fetch(analysis).await.unwrap();
    assert_eq!(fetched.metadata.total_count, 3);
    assert_eq!(fetched.metadata.attempts, 3);
    assert_eq!(faulty.fetch_calls(), 3);
    // One metric for the whole fetch, not one per attempt.
    assert_eq!(monitor.len(), 1);
    assert_eq!(monitor.performance_stats().success_rate, 1.0);
}

#[tokio::test]
async fn exhausted_retries_are_store_unavailable() {
    let (inner, analysis) = seeded_store(1);
    let faulty = Arc::new(FaultyStore::wrap(inner).failing_fetches(100));
    let config = PersistenceConfig {
        max_retries: 2,
        ..fast_config()
    };
    let (engine, monitor) = engine_over(faulty.clone(), config);

    let err = engine.fetch(analysis).await.unwrap_err();
    match &err {
        VigilError::StoreUnavailable { attempts, .. } => assert_eq!(*attempts, 3),
        other => panic!("expected StoreUnavailable, got {other:?}"),
    }
    assert_eq!(err.error_type(), "unavailable");
    assert_eq!(faulty.fetch_calls(), 3);
    assert_eq!(monitor.performance_stats().recent_failures.len(), 1);
}

#[tokio::test]
async fn slow_store_times_out() {
    let (inner, analysis) = seeded_store(2);
    let faulty = Arc::new(FaultyStore::wrap(inner).slow_fetches(Duration::from_millis(300)));
    let config = PersistenceConfig {
        fetch_timeout_ms: 50,
        ..fast_config()
    };
    let (engine, monitor) = engine_over(faulty, config);

    let err = engine.fetch(analysis).await.unwrap_err();
    assert!(
        matches!(err, VigilError::Timeout { budget_ms: 50, .. }),
        "got {err:?}"
    );
    assert_eq!(err.error_type(), "timeout");

    let stats = monitor.performance_stats();
    assert_eq!(stats.total_operations, 1);
    assert!(stats.recent_failures[0]
        .error_message
        .as_deref()
        .unwrap_or_default()
        .contains("timed out"));
}

#[tokio::test]
async fn empty_result_is_not_a_timeout() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let analysis = store.create_analysis("empty", None).unwrap();
    let (engine, _) = engine_over(Arc::new(FaultyStore::wrap(store)), fast_config());

    let fetched = engine.fetch(analysis).await.unwrap();
    assert!(fetched.recommendations.is_empty());
}

#[tokio::test]
async fn store_write_failure_is_not_retried_and_writes_nothing() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let analysis = store.create_analysis("writes", None).unwrap();
    let faulty = Arc::new(FaultyStore::wrap(store.clone()).failing_inserts());
    let (engine, monitor) = engine_over(faulty, fast_config());

    let err = engine.save(analysis, make_inputs(3)).await.unwrap_err();
    assert_eq!(err.error_type(), "query");
    assert_eq!(store.count_by_analysis(analysis).unwrap(), 0);
    assert_eq!(monitor.len(), 1);
}

#[tokio::test]
async fn failed_verification_read_still_reports_the_commit() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let analysis = store.create_analysis("verify", None).unwrap();
    // The first fetch after the insert is the verification read.
    let faulty = Arc::new(FaultyStore::wrap(store.clone()).failing_fetches(1));
    let (engine, _) = engine_over(faulty, fast_config());

    let saved = engine.save(analysis, make_inputs(2)).await.unwrap();
    assert_eq!(saved.saved_count, 2);
    assert!(!saved.verification.verified);
    assert_eq!(saved.verification.expected_count, 2);
    assert!(!saved.verification.issues.is_empty());
    assert_eq!(store.count_by_analysis(analysis).unwrap(), 2);
}

#[tokio::test]
async fn skipped_verification_trusts_the_commit() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let analysis = store.create_analysis("no verify", None).unwrap();
    let faulty = Arc::new(FaultyStore::wrap(store));
    let config = PersistenceConfig {
        verify_after_save: false,
        ..fast_config()
    };
    let (engine, _) = engine_over(faulty.clone(), config);

    let saved = engine.save(analysis, make_inputs(2)).await.unwrap();
    assert!(saved.verification.verified);
    assert_eq!(faulty.fetch_calls(), 0);
}
