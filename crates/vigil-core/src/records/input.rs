use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Effort, Payload, Priority, RecommendationStatus};

/// A recommendation as submitted by the producer, before validation.
///
/// Required fields are optional here so that a missing field becomes a
/// [`ValidationError`](crate::errors::ValidationError) naming the record,
/// not a deserialization failure. Every field this layer does not interpret
/// is collected into `payload`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl RecommendationInput {
    /// Builder used by producers and tests for a fully-populated input.
    pub fn new(
        external_id: impl Into<String>,
        title: impl Into<String>,
        priority: Priority,
        category: impl Into<String>,
        effort: Effort,
    ) -> Self {
        Self {
            external_id: Some(external_id.into()),
            title: Some(title.into()),
            priority: Some(priority.as_str().to_string()),
            category: Some(category.into()),
            effort: Some(effort.as_str().to_string()),
            status: None,
            payload: Map::new(),
        }
    }

    /// Attach one payload field (description, actionSteps, example, resources...).
    pub fn with_payload_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// Label used in error messages: the external id, or `#<index>`.
    pub fn label(&self, index: usize) -> String {
        match &self.external_id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => format!("#{index}"),
        }
    }
}

/// A recommendation that passed validation and sanitization and is ready to
/// be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecommendation {
    pub external_id: String,
    pub title: String,
    pub priority: Priority,
    pub category: String,
    pub effort: Effort,
    pub status: RecommendationStatus,
    pub payload: Payload,
}
