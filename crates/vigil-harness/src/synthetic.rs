//! Synthetic recommendations for one harness run.

use serde_json::json;
use vigil_core::records::{Effort, Priority, RecommendationInput};

/// `count` well-formed records cycling through every priority and effort.
/// External ids are `flow_<run>_<n>`, unique per run.
pub fn synthetic_batch(run_id: &str, count: usize) -> Vec<RecommendationInput> {
    let short_run = &run_id[..run_id.len().min(8)];
    (0..count)
        .map(|i| {
            let priority = Priority::ALL[i % Priority::ALL.len()];
            let effort = Effort::ALL[i % Effort::ALL.len()];
            RecommendationInput::new(
                format!("flow_{short_run}_{}", i + 1),
                format!("Flow verification record {}", i + 1),
                priority,
                "flow-verification",
                effort,
            )
            .with_payload_field("description", json!(format!("synthetic record {} of {count}", i + 1)))
            .with_payload_field("actionSteps", json!(["save", "fetch", "audit"]))
            .with_payload_field(
                "example",
                json!({ "before": "missing", "after": format!("present #{}", i + 1) }),
            )
        })
        .collect()
}

/// External ids of a batch, in order.
pub fn external_ids(batch: &[RecommendationInput]) -> Vec<String> {
    batch
        .iter()
        .enumerate()
        .map(|(i, r)| r.label(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_is_unique_and_covers_enums() {
        let batch = synthetic_batch("0123456789abcdef", 10);
        let ids = external_ids(&batch);
        assert_eq!(ids[0], "flow_01234567_1");
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 10);
        assert!(batch.iter().any(|r| r.priority.as_deref() == Some("critical")));
        assert!(batch.iter().any(|r| r.effort.as_deref() == Some("complex")));
    }
}
