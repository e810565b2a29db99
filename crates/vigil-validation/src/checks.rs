//! Per-record structural checks shared by the verifier and the auditor.

use vigil_core::records::RecommendationRow;

/// Every problem found on one stored row; empty when the row is sound.
pub fn record_issues(row: &RecommendationRow) -> Vec<String> {
    let mut issues = Vec::new();

    if row.external_id.trim().is_empty() {
        issues.push("externalId is empty".to_string());
    }
    if row.title.trim().is_empty() {
        issues.push("title is empty".to_string());
    }
    if row.priority().is_none() {
        issues.push(format!("priority '{}' is out of range", row.priority));
    }
    if row.category.trim().is_empty() {
        issues.push("category is empty".to_string());
    }
    if row.effort().is_none() {
        issues.push(format!("effort '{}' is out of range", row.effort));
    }
    if row.status().is_none() {
        issues.push(format!("status '{}' is out of range", row.status));
    }
    payload_issues(row, &mut issues);

    issues
}

fn payload_issues(row: &RecommendationRow, issues: &mut Vec<String>) {
    if row.payload.to_value().is_err() {
        issues.push("payload is not valid JSON".to_string());
    }
    if row.payload.content_hash() != row.payload_hash {
        issues.push("payload hash mismatch".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::records::Payload;

    fn sound_row() -> RecommendationRow {
        let payload = Payload::empty();
        RecommendationRow {
            id: 1,
            analysis_id: 1,
            external_id: "rec_1".into(),
            title: "Add alt text".into(),
            priority: "high".into(),
            category: "accessibility".into(),
            effort: "quick".into(),
            status: "pending".into(),
            payload_hash: payload.content_hash(),
            payload,
            created_at: "2026-01-01T00:00:00Z".into(),
            updated_at: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn sound_row_has_no_issues() {
        assert!(record_issues(&sound_row()).is_empty());
    }

    #[test]
    fn each_field_is_reported() {
        let mut row = sound_row();
        row.title = "  ".into();
        row.priority = "urgent".into();
        row.category = String::new();
        row.effort = "trivial".into();
        let issues = record_issues(&row);
        assert_eq!(issues.len(), 4, "{issues:?}");
        assert!(issues.iter().any(|i| i.contains("priority 'urgent'")));
    }

    #[test]
    fn damaged_payload_is_reported_twice() {
        let mut row = sound_row();
        row.payload = Payload::from_stored("{not json".into());
        let issues = record_issues(&row);
        assert!(issues.contains(&"payload is not valid JSON".to_string()));
        assert!(issues.contains(&"payload hash mismatch".to_string()));
    }
}
