//! RecommendationRow → the record shape returned to front-ends.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use vigil_core::records::RecommendationRow;

/// A stored recommendation with its payload decoded back into JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    pub id: i64,
    pub analysis_id: i64,
    pub external_id: String,
    pub title: String,
    pub priority: String,
    pub category: String,
    pub effort: String,
    pub status: String,
    /// Decoded payload; the raw text when it no longer parses.
    pub payload: Value,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RecommendationRow> for RecommendationView {
    fn from(row: RecommendationRow) -> Self {
        let payload = row
            .payload
            .to_value()
            .unwrap_or_else(|_| Value::String(row.payload.as_str().to_string()));
        Self {
            id: row.id,
            analysis_id: row.analysis_id,
            external_id: row.external_id,
            title: row.title,
            priority: row.priority,
            category: row.category,
            effort: row.effort,
            status: row.status,
            payload,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub fn rows_to_views(rows: Vec<RecommendationRow>) -> Vec<RecommendationView> {
    rows.into_iter().map(RecommendationView::from).collect()
}
