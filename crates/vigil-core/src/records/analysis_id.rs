use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::errors::{VigilError, VigilResult};

/// Identifier of a parent analysis. Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct AnalysisId(i64);

impl AnalysisId {
    pub fn new(raw: i64) -> VigilResult<Self> {
        if raw <= 0 {
            return Err(VigilError::invalid_reference(format!(
                "{raw} is not a positive integer"
            )));
        }
        Ok(Self(raw))
    }

    /// Parse an id as it arrives across the gateway: a JSON integer or a
    /// string of decimal digits.
    pub fn from_value(value: &Value) -> VigilResult<Self> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(raw) => Self::new(raw),
                None => Err(VigilError::invalid_reference(format!(
                    "{n} is not a positive integer"
                ))),
            },
            Value::String(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<i64>() {
                    Ok(raw) => Self::new(raw),
                    Err(_) => Err(VigilError::invalid_reference(format!(
                        "'{s}' is not numeric"
                    ))),
                }
            }
            other => Err(VigilError::invalid_reference(format!(
                "expected an integer, got {}",
                json_kind(other)
            ))),
        }
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human name of a JSON value's kind, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
