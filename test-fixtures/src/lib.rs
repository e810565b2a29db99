//! Test fixture loader and record builders shared by the Vigil test suites.
//!
//! JSON fixtures live next to this crate under `recommendations/`.

pub mod stores;

pub use stores::FaultyStore;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use vigil_core::records::{
    Effort, Payload, Priority, RecommendationInput, RecommendationStatus, ValidatedRecommendation,
};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// The two-record batch used by the save/fetch scenarios.
pub fn well_formed_batch_value() -> Value {
    load_fixture_value("recommendations/well_formed_batch.json")
}

/// One rejected-payload case.
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidPayloadCase {
    pub name: String,
    pub records: Value,
    /// "payload" for shape errors, otherwise the offending field.
    pub expected: String,
}

pub fn invalid_payload_cases() -> Vec<InvalidPayloadCase> {
    load_fixture("recommendations/invalid_payloads.json")
}

const PRIORITIES: [Priority; 4] = Priority::ALL;
const EFFORTS: [Effort; 5] = Effort::ALL;

/// A deterministic well-formed input; `i` picks the enum values round-robin.
pub fn make_input(i: usize) -> RecommendationInput {
    RecommendationInput::new(
        format!("rec_{}", i + 1),
        format!("Recommendation {}", i + 1),
        PRIORITIES[i % PRIORITIES.len()],
        "content",
        EFFORTS[i % EFFORTS.len()],
    )
    .with_payload_field("description", json!(format!("description {}", i + 1)))
    .with_payload_field("actionSteps", json!(["step one", "step two"]))
}

/// `n` well-formed inputs.
pub fn make_inputs(n: usize) -> Vec<RecommendationInput> {
    (0..n).map(make_input).collect()
}

/// `n` inputs as the JSON array a front-end would send.
pub fn make_inputs_value(n: usize) -> Value {
    serde_json::to_value(make_inputs(n)).unwrap_or_else(|e| panic!("serialize inputs: {e}"))
}

/// A record ready for the store, bypassing the persistence layer.
pub fn make_validated(i: usize) -> ValidatedRecommendation {
    ValidatedRecommendation {
        external_id: format!("rec_{}", i + 1),
        title: format!("Recommendation {}", i + 1),
        priority: PRIORITIES[i % PRIORITIES.len()],
        category: "content".to_string(),
        effort: EFFORTS[i % EFFORTS.len()],
        status: RecommendationStatus::Pending,
        payload: Payload::from_value(&json!({ "description": format!("description {}", i + 1) }))
            .unwrap_or_else(|e| panic!("payload: {e}")),
    }
}

pub fn make_validated_batch(n: usize) -> Vec<ValidatedRecommendation> {
    (0..n).map(make_validated).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn recommendation_fixtures_exist() {
        for f in [
            "recommendations/well_formed_batch.json",
            "recommendations/invalid_payloads.json",
        ] {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn well_formed_batch_has_two_records() {
        let batch = well_formed_batch_value();
        assert_eq!(batch.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn builders_are_deterministic() {
        assert_eq!(make_input(3), make_input(3));
        assert_eq!(make_validated_batch(4).len(), 4);
        assert_eq!(make_validated(0).external_id, "rec_1");
    }
}
