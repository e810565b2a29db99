use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::errors::VigilResult;

/// Opaque serialized sub-document (description, action steps, examples,
/// resources). This layer only guarantees it is valid JSON; its schema
/// belongs to the producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct Payload(String);

impl Payload {
    /// Serialize a JSON value into a payload blob.
    pub fn from_value(value: &Value) -> VigilResult<Self> {
        Ok(Self(serde_json::to_string(value)?))
    }

    /// Wrap an already-serialized blob as read back from the store.
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn empty() -> Self {
        Self("{}".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse back into JSON. Fails if the stored blob was damaged.
    pub fn to_value(&self) -> VigilResult<Value> {
        Ok(serde_json::from_str(&self.0)?)
    }

    /// blake3 hex digest of the serialized blob.
    pub fn content_hash(&self) -> String {
        blake3::hash(self.0.as_bytes()).to_hex().to_string()
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::empty()
    }
}
