//! Batch parsing and per-record validation.
//!
//! Shape problems with the batch as a whole are `InvalidPayload`; problems
//! with one record are a `ValidationError` naming the record and field. The
//! first invalid record aborts the batch.

use std::collections::HashMap;
use std::str::FromStr;

use serde_json::{Map, Value};
use vigil_core::constants::{EXTERNAL_ID_PREFIX, MAX_BATCH_SIZE, MAX_SHORT_FIELD_LEN, MAX_TITLE_LEN};
use vigil_core::errors::{ValidationError, VigilError, VigilResult};
use vigil_core::records::analysis_id::json_kind;
use vigil_core::records::{
    Effort, Payload, Priority, RecommendationInput, RecommendationStatus, ValidatedRecommendation,
};

use crate::sanitize::sanitize_text;

/// Keys read as strings; any other key is payload.
const STRING_FIELDS: [&str; 7] = [
    "id",
    "externalId",
    "title",
    "priority",
    "category",
    "effort",
    "status",
];

/// Turn the raw `records` argument into inputs.
pub fn parse_batch(records: &Value) -> VigilResult<Vec<RecommendationInput>> {
    let items = records.as_array().ok_or_else(|| {
        VigilError::invalid_payload(format!(
            "expected an array of recommendations, got {}",
            json_kind(records)
        ))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item))
        .collect()
}

fn parse_record(index: usize, item: &Value) -> VigilResult<RecommendationInput> {
    let object = item.as_object().ok_or_else(|| {
        VigilError::invalid_payload(format!(
            "record {index} is {}, expected an object",
            json_kind(item)
        ))
    })?;
    check_string_fields(index, object)?;
    let object = resolve_external_id_key(index, object)?;
    serde_json::from_value(Value::Object(object))
        .map_err(|e| VigilError::invalid_payload(format!("record {index}: {e}")))
}

/// `id` and `externalId` name the same field; at most one may carry a value.
fn resolve_external_id_key(
    index: usize,
    object: &Map<String, Value>,
) -> Result<Map<String, Value>, ValidationError> {
    let mut object = object.clone();
    for key in ["externalId", "id"] {
        if object.get(key).is_some_and(Value::is_null) {
            object.remove(key);
        }
    }
    if let (Some(Value::String(external)), Some(Value::String(id))) =
        (object.get("externalId"), object.get("id"))
    {
        return Err(ValidationError::new(
            index,
            external.clone(),
            "externalId",
            format!("conflicts with 'id' ({id}); send only one of them"),
        ));
    }
    Ok(object)
}

fn check_string_fields(index: usize, object: &Map<String, Value>) -> Result<(), ValidationError> {
    let label = ["externalId", "id"]
        .iter()
        .find_map(|k| object.get(*k).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{index}"));

    for field in STRING_FIELDS {
        match object.get(field) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => {
                return Err(ValidationError::new(
                    index,
                    label,
                    field,
                    format!("must be a string, got {}", json_kind(other)),
                ))
            }
        }
    }
    Ok(())
}

/// Validate and sanitize every record. Fails on the first bad one.
pub fn validate_batch(inputs: Vec<RecommendationInput>) -> VigilResult<Vec<ValidatedRecommendation>> {
    if inputs.len() > MAX_BATCH_SIZE {
        return Err(VigilError::invalid_payload(format!(
            "batch of {} exceeds the maximum of {MAX_BATCH_SIZE}",
            inputs.len()
        )));
    }
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(inputs.len());
    let mut validated = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.into_iter().enumerate() {
        let record = validate_record(index, input)?;
        if let Some(first) = seen.insert(record.external_id.clone(), index) {
            return Err(ValidationError::new(
                index,
                record.external_id,
                "externalId",
                format!("duplicates record {first}"),
            )
            .into());
        }
        validated.push(record);
    }
    Ok(validated)
}

pub fn validate_record(
    index: usize,
    input: RecommendationInput,
) -> Result<ValidatedRecommendation, ValidationError> {
    let label = input.label(index);
    let err = |field: &str, reason: String| ValidationError::new(index, label.clone(), field, reason);

    let external_id = match input.external_id.as_deref().map(|s| sanitize_text(s, MAX_SHORT_FIELD_LEN)) {
        Some(id) if !id.is_empty() => id,
        _ => format!("{EXTERNAL_ID_PREFIX}{}", index + 1),
    };

    let title = required_text(input.title.as_deref(), MAX_TITLE_LEN)
        .map_err(|reason| err("title", reason))?;
    let category = required_text(input.category.as_deref(), MAX_SHORT_FIELD_LEN)
        .map_err(|reason| err("category", reason))?;
    let priority: Priority =
        required_enum(input.priority.as_deref()).map_err(|reason| err("priority", reason))?;
    let effort: Effort =
        required_enum(input.effort.as_deref()).map_err(|reason| err("effort", reason))?;
    let status = match input.status.as_deref().map(str::trim) {
        None | Some("") => RecommendationStatus::default(),
        Some(raw) => RecommendationStatus::from_str(raw).map_err(|reason| err("status", reason))?,
    };

    let payload = Payload::from_value(&Value::Object(input.payload))
        .map_err(|e| err("payload", format!("is not serializable: {e}")))?;

    Ok(ValidatedRecommendation {
        external_id,
        title,
        priority,
        category,
        effort,
        status,
        payload,
    })
}

fn required_text(value: Option<&str>, max_chars: usize) -> Result<String, String> {
    match value.map(|v| sanitize_text(v, max_chars)) {
        None => Err("is required".to_string()),
        Some(text) if text.is_empty() => Err("must not be empty".to_string()),
        Some(text) => Ok(text),
    }
}

fn required_enum<T: FromStr<Err = String>>(value: Option<&str>) -> Result<T, String> {
    match value.map(str::trim) {
        None | Some("") => Err("is required".to_string()),
        Some(raw) => T::from_str(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_json() -> Value {
        json!({
            "id": "rec_1",
            "title": "Add a meta description",
            "priority": "high",
            "category": "seo",
            "effort": "quick",
            "description": "kept in the payload"
        })
    }

    #[test]
    fn unknown_keys_land_in_payload() {
        let inputs = parse_batch(&json!([valid_json()])).unwrap();
        let validated = validate_batch(inputs).unwrap();
        let payload = validated[0].payload.to_value().unwrap();
        assert_eq!(payload["description"], "kept in the payload");
        assert!(payload.get("title").is_none());
    }

    #[test]
    fn missing_external_id_is_assigned_by_position() {
        let mut record = valid_json();
        record.as_object_mut().unwrap().remove("id");
        let inputs = parse_batch(&json!([valid_json(), record])).unwrap();
        // The first record keeps rec_1; the second becomes rec_2.
        let validated = validate_batch(inputs).unwrap();
        assert_eq!(validated[1].external_id, "rec_2");
    }

    #[test]
    fn long_title_is_capped() {
        let mut record = valid_json();
        record["title"] = json!("x".repeat(MAX_TITLE_LEN + 50));
        let validated = validate_batch(parse_batch(&json!([record])).unwrap()).unwrap();
        assert_eq!(validated[0].title.chars().count(), MAX_TITLE_LEN);
    }

    #[test]
    fn status_defaults_to_pending() {
        let validated = validate_batch(parse_batch(&json!([valid_json()])).unwrap()).unwrap();
        assert_eq!(validated[0].status, RecommendationStatus::Pending);
    }

    #[test]
    fn id_and_external_id_together_name_the_record() {
        let mut record = valid_json();
        record["externalId"] = json!("rec_9");
        let err = parse_batch(&json!([valid_json(), record])).unwrap_err();
        match err {
            VigilError::Validation(e) => {
                assert_eq!(e.index, 1);
                assert_eq!(e.field, "externalId");
                assert_eq!(e.external_id, "rec_9");
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn null_id_beside_external_id_is_ignored() {
        let mut record = valid_json();
        record["id"] = Value::Null;
        record["externalId"] = json!("rec_7");
        let validated = validate_batch(parse_batch(&json!([record])).unwrap()).unwrap();
        assert_eq!(validated[0].external_id, "rec_7");
    }

    #[test]
    fn default_id_colliding_with_explicit_id_is_rejected() {
        let mut unnamed = valid_json();
        unnamed.as_object_mut().unwrap().remove("id");
        let mut named = valid_json();
        named["id"] = json!("rec_1");
        // Record 0 defaults to rec_1; record 1 claims it explicitly.
        let err = validate_batch(parse_batch(&json!([unnamed, named])).unwrap()).unwrap_err();
        match err {
            VigilError::Validation(e) => {
                assert_eq!(e.index, 1);
                assert_eq!(e.field, "externalId");
                assert!(e.reason.contains("duplicates record 0"));
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let inputs = vec![RecommendationInput::default(); MAX_BATCH_SIZE + 1];
        let err = validate_batch(inputs).unwrap_err();
        assert!(matches!(err, VigilError::InvalidPayload { .. }));
    }
}
