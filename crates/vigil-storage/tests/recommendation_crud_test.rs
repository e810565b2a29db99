//! Analysis and recommendation CRUD against an in-memory store.

use test_fixtures::{make_validated, make_validated_batch};
use vigil_core::records::{AnalysisId, RecommendationStatus};
use vigil_core::traits::IRecommendationStorage;
use vigil_storage::StorageEngine;

fn engine_with_analysis() -> (StorageEngine, AnalysisId) {
    let storage = StorageEngine::open_in_memory().unwrap();
    let id = storage.create_analysis("crud", None).unwrap();
    (storage, id)
}

#[test]
fn create_analysis_with_explicit_id() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let id = storage.create_analysis("explicit", Some(123)).unwrap();
    assert_eq!(id.value(), 123);
    let record = storage.get_analysis(id).unwrap().unwrap();
    assert_eq!(record.label, "explicit");
    assert!(!record.created_at.is_empty());
}

#[test]
fn analysis_exists_reports_missing() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let missing = AnalysisId::new(999).unwrap();
    assert!(!storage.analysis_exists(missing).unwrap());
    assert!(storage.get_analysis(missing).unwrap().is_none());
}

#[test]
fn insert_then_fetch_preserves_order_and_fields() {
    let (storage, id) = engine_with_analysis();
    let batch = make_validated_batch(5);
    let ids = storage.insert_batch(id, &batch).unwrap();
    assert_eq!(ids.len(), 5);
    assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids ascend: {ids:?}");

    let rows = storage.fetch_by_analysis(id).unwrap();
    assert_eq!(rows.len(), 5);
    for ((row, input), assigned) in rows.iter().zip(&batch).zip(&ids) {
        assert_eq!(row.id, *assigned);
        assert_eq!(row.analysis_id, id.value());
        assert_eq!(row.external_id, input.external_id);
        assert_eq!(row.title, input.title);
        assert_eq!(row.priority(), Some(input.priority));
        assert_eq!(row.effort(), Some(input.effort));
        assert_eq!(row.status(), Some(RecommendationStatus::Pending));
        assert_eq!(row.payload, input.payload);
        assert_eq!(row.payload_hash, input.payload.content_hash());
    }
}

#[test]
fn empty_batch_is_noop() {
    let (storage, id) = engine_with_analysis();
    let ids = storage.insert_batch(id, &[]).unwrap();
    assert!(ids.is_empty());
    assert_eq!(storage.count_by_analysis(id).unwrap(), 0);
}

#[test]
fn fetch_unknown_analysis_is_empty() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let rows = storage
        .fetch_by_analysis(AnalysisId::new(42).unwrap())
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn batches_are_isolated_per_analysis() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let a = storage.create_analysis("a", None).unwrap();
    let b = storage.create_analysis("b", None).unwrap();
    storage.insert_batch(a, &make_validated_batch(3)).unwrap();
    // Same external ids are fine under a different analysis.
    storage.insert_batch(b, &make_validated_batch(2)).unwrap();

    assert_eq!(storage.count_by_analysis(a).unwrap(), 3);
    assert_eq!(storage.count_by_analysis(b).unwrap(), 2);
    assert_eq!(storage.total_recommendations().unwrap(), 5);
}

#[test]
fn update_status_changes_only_status() {
    let (storage, id) = engine_with_analysis();
    let ids = storage.insert_batch(id, &[make_validated(0)]).unwrap();
    let before = storage.get_recommendation(ids[0]).unwrap().unwrap();

    let changed = storage
        .update_status(ids[0], RecommendationStatus::InProgress)
        .unwrap();
    assert!(changed);

    let after = storage.get_recommendation(ids[0]).unwrap().unwrap();
    assert_eq!(after.status, "in-progress");
    assert_eq!(after.title, before.title);
    assert_eq!(after.payload, before.payload);
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn update_status_unknown_record_returns_false() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let changed = storage
        .update_status(12345, RecommendationStatus::Completed)
        .unwrap();
    assert!(!changed);
}

#[test]
fn delete_by_analysis_removes_rows_and_keeps_analysis() {
    let (storage, id) = engine_with_analysis();
    storage.insert_batch(id, &make_validated_batch(4)).unwrap();
    assert_eq!(storage.delete_by_analysis(id).unwrap(), 4);
    assert_eq!(storage.count_by_analysis(id).unwrap(), 0);
    assert!(storage.analysis_exists(id).unwrap());
}

#[test]
fn delete_analysis_cascades() {
    let (storage, id) = engine_with_analysis();
    storage.insert_batch(id, &make_validated_batch(3)).unwrap();
    assert!(storage.delete_analysis(id).unwrap());
    assert!(!storage.analysis_exists(id).unwrap());
    assert_eq!(storage.total_recommendations().unwrap(), 0);
    assert!(!storage.delete_analysis(id).unwrap());
}

#[test]
fn ids_are_never_reused() {
    let (storage, id) = engine_with_analysis();
    let first = storage.insert_batch(id, &make_validated_batch(2)).unwrap();
    storage.delete_by_analysis(id).unwrap();
    let second = storage.insert_batch(id, &make_validated_batch(2)).unwrap();
    assert!(second[0] > first[1]);
}

#[test]
fn ping_and_integrity_check_on_fresh_store() {
    let storage = StorageEngine::open_in_memory().unwrap();
    storage.ping().unwrap();
    assert!(storage.integrity_check().unwrap().is_empty());
}
