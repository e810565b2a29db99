use std::str::FromStr;

use serde_json::json;
use vigil_core::records::*;

#[test]
fn analysis_id_accepts_positive_integers_and_numeric_strings() {
    assert_eq!(AnalysisId::from_value(&json!(123)).unwrap().value(), 123);
    assert_eq!(AnalysisId::from_value(&json!("42")).unwrap().value(), 42);
}

#[test]
fn analysis_id_rejects_non_numeric_and_non_positive() {
    for bad in [json!("invalid"), json!(0), json!(-5), json!(1.5), json!(null), json!([1])] {
        let err = AnalysisId::from_value(&bad).unwrap_err();
        assert!(
            err.to_string().contains("Invalid analysis ID"),
            "{bad} should be rejected with an analysis id message, got {err}"
        );
    }
}

#[test]
fn enums_parse_their_wire_names() {
    assert_eq!(Priority::from_str("critical").unwrap(), Priority::Critical);
    assert_eq!(Effort::from_str("complex").unwrap(), Effort::Complex);
    assert_eq!(
        RecommendationStatus::from_str("in-progress").unwrap(),
        RecommendationStatus::InProgress
    );
    assert!(Priority::from_str("urgent").is_err());
    assert!(Effort::from_str("trivial").is_err());
    assert!(RecommendationStatus::from_str("in_progress").is_err());
}

#[test]
fn status_defaults_to_pending() {
    assert_eq!(RecommendationStatus::default(), RecommendationStatus::Pending);
    assert_eq!(
        serde_json::to_string(&RecommendationStatus::InProgress).unwrap(),
        "\"in-progress\""
    );
}

#[test]
fn input_collects_unknown_fields_into_payload() {
    let input: RecommendationInput = serde_json::from_value(json!({
        "id": "rec_1",
        "title": "Add meta description",
        "priority": "high",
        "category": "seo",
        "effort": "quick",
        "description": "Missing meta description",
        "actionSteps": ["open head", "add tag"],
    }))
    .unwrap();
    assert_eq!(input.external_id.as_deref(), Some("rec_1"));
    assert_eq!(input.title.as_deref(), Some("Add meta description"));
    assert!(input.status.is_none());
    assert_eq!(input.payload.len(), 2);
    assert!(input.payload.contains_key("actionSteps"));
}

#[test]
fn input_label_falls_back_to_index() {
    let input = RecommendationInput::default();
    assert_eq!(input.label(3), "#3");
    let named = RecommendationInput::new("rec_9", "t", Priority::Low, "c", Effort::Easy);
    assert_eq!(named.label(3), "rec_9");
}

#[test]
fn payload_hash_tracks_content() {
    let a = Payload::from_value(&json!({"description": "x"})).unwrap();
    let b = Payload::from_value(&json!({"description": "y"})).unwrap();
    assert_ne!(a.content_hash(), b.content_hash());
    assert_eq!(a.content_hash(), a.clone().content_hash());
    assert_eq!(a.to_value().unwrap(), json!({"description": "x"}));
}

#[test]
fn damaged_payload_fails_to_parse() {
    let p = Payload::from_stored("{not json".to_string());
    assert!(p.to_value().is_err());
}
