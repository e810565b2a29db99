//! Consistency audit and post-write verification against a real store.

use std::sync::Arc;

use rusqlite::params;
use test_fixtures::make_validated_batch;
use vigil_core::records::AnalysisId;
use vigil_core::traits::IRecommendationStorage;
use vigil_storage::StorageEngine;
use vigil_validation::{ConsistencyAuditor, PostWriteVerifier};

fn seeded(n: usize) -> (Arc<StorageEngine>, AnalysisId, Vec<i64>) {
    let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
    let analysis = engine.create_analysis("audit", None).unwrap();
    let ids = engine
        .insert_batch(analysis, &make_validated_batch(n))
        .unwrap();
    (engine, analysis, ids)
}

/// Write a raw column value, bypassing every check this layer makes.
fn tamper(engine: &StorageEngine, record_id: i64, column: &str, value: &str) {
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            conn.execute(
                &format!("UPDATE recommendations SET {column} = ?1 WHERE id = ?2"),
                params![value, record_id],
            )
            .unwrap();
            Ok(())
        })
        .unwrap();
}

#[test]
fn clean_analysis_scores_100() {
    let (engine, analysis, _) = seeded(5);
    let auditor = ConsistencyAuditor::new(engine);
    let result = auditor.audit(analysis, 5).unwrap();

    assert_eq!(result.analysis_id, analysis.value());
    assert_eq!(result.actual_count, 5);
    assert_eq!(result.integrity_score, 100);
    assert!(result.is_consistent);
    assert!(result.corrupted.is_empty());
}

#[test]
fn count_mismatch_costs_ten_per_record() {
    let (engine, analysis, _) = seeded(3);
    let result = ConsistencyAuditor::new(engine).audit(analysis, 5).unwrap();
    assert_eq!(result.integrity_score, 80);
    assert!(!result.is_consistent);
}

#[test]
fn corrupted_fields_are_reported_per_record() {
    let (engine, analysis, ids) = seeded(4);
    tamper(&engine, ids[1], "priority", "urgent");
    tamper(&engine, ids[3], "title", "");

    let result = ConsistencyAuditor::new(engine.clone())
        .audit(analysis, 4)
        .unwrap();
    assert_eq!(result.corrupted.len(), 2);
    assert_eq!(result.corrupted[0].record_id, ids[1]);
    assert!(result.corrupted[0].issues[0].contains("priority 'urgent'"));
    assert_eq!(result.corrupted[1].issues, vec!["title is empty".to_string()]);
    assert_eq!(result.integrity_score, 70);
    assert!(!result.is_consistent);
}

#[test]
fn payload_tampering_is_detected() {
    let (engine, analysis, ids) = seeded(2);
    tamper(&engine, ids[0], "payload", r#"{"description":"edited"}"#);

    let result = ConsistencyAuditor::new(engine).audit(analysis, 2).unwrap();
    assert_eq!(result.corrupted.len(), 1);
    assert_eq!(
        result.corrupted[0].issues,
        vec!["payload hash mismatch".to_string()]
    );
}

#[test]
fn audit_never_mutates() {
    let (engine, analysis, ids) = seeded(2);
    tamper(&engine, ids[0], "effort", "trivial");
    let before = engine.fetch_by_analysis(analysis).unwrap();
    let auditor = ConsistencyAuditor::new(engine.clone());
    auditor.audit(analysis, 2).unwrap();
    auditor.audit(analysis, 9).unwrap();
    assert_eq!(engine.fetch_by_analysis(analysis).unwrap(), before);
}

#[test]
fn expected_ids_list_missing_and_unexpected() {
    let (engine, analysis, _) = seeded(3);
    let expected = vec![
        "rec_1".to_string(),
        "rec_2".to_string(),
        "rec_9".to_string(),
    ];
    let result = ConsistencyAuditor::new(engine)
        .audit_expected_ids(analysis, &expected)
        .unwrap();
    assert_eq!(result.missing, vec!["rec_9".to_string()]);
    assert_eq!(result.unexpected, vec!["rec_3".to_string()]);
    // Counts match (3 vs 3) so the score is untouched, but the ids differ.
    assert_eq!(result.integrity_score, 100);
    assert!(!result.is_consistent);
}

#[test]
fn verifier_confirms_new_rows() {
    let (engine, analysis, ids) = seeded(3);
    let verification = PostWriteVerifier::new(engine).verify(analysis, &ids, 3);
    assert!(verification.verified);
    assert_eq!(verification.actual_count, 3);
    assert!(verification.issues.is_empty());
}

#[test]
fn verifier_ignores_earlier_batches() {
    let (engine, analysis, _) = seeded(3);
    let mut more = make_validated_batch(5);
    more.drain(..3);
    let new_ids = engine.insert_batch(analysis, &more).unwrap();

    let verification = PostWriteVerifier::new(engine).verify(analysis, &new_ids, 2);
    assert!(verification.verified);
    assert_eq!(verification.actual_count, 2);
}

#[test]
fn verifier_flags_missing_rows() {
    let (engine, analysis, ids) = seeded(2);
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            conn.execute("DELETE FROM recommendations WHERE id = ?1", params![ids[0]])
                .unwrap();
            Ok(())
        })
        .unwrap();

    let verification = PostWriteVerifier::new(engine).verify(analysis, &ids, 2);
    assert!(!verification.verified);
    assert_eq!(verification.expected_count, 2);
    assert_eq!(verification.actual_count, 1);
}
