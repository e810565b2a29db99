use vigil_core::errors::*;

#[test]
fn invalid_reference_mentions_analysis_id() {
    let err = VigilError::invalid_reference("'invalid' is not numeric");
    assert!(err.to_string().contains("Invalid analysis ID"));
    assert_eq!(err.error_code(), error_code::INVALID_REFERENCE);
    assert_eq!(err.error_type(), "reference");
}

#[test]
fn validation_error_names_record_and_field() {
    let err: VigilError = ValidationError::new(1, "rec_2", "priority", "is missing").into();
    let msg = err.to_string();
    assert!(msg.contains("rec_2"));
    assert!(msg.contains("priority"));
    assert!(msg.contains("record 1"));
    assert_eq!(err.error_type(), "validation");
}

#[test]
fn timeout_is_tagged_timeout_and_transient() {
    let err = VigilError::Timeout {
        operation: "fetch".into(),
        budget_ms: 100,
    };
    assert_eq!(err.error_type(), "timeout");
    assert_eq!(err.error_code(), error_code::TIMEOUT);
    assert!(err.is_transient());
    assert!(err.to_string().contains("100ms"));
}

#[test]
fn sqlite_errors_map_to_query_type() {
    let err: VigilError = StorageError::SqliteError {
        message: "no such table".into(),
    }
    .into();
    assert_eq!(err.error_type(), "query");
    assert_eq!(err.error_code(), error_code::STORE_ERROR);
    assert!(!err.is_transient());
}

#[test]
fn connection_unavailable_is_transient() {
    let err: VigilError = StorageError::ConnectionUnavailable {
        reason: "database is locked".into(),
    }
    .into();
    assert!(err.is_transient());
    assert_eq!(err.error_code(), error_code::STORE_UNAVAILABLE);
    assert_eq!(err.error_type(), "unavailable");
}

#[test]
fn validation_errors_are_never_transient() {
    let err: VigilError = ValidationError::new(0, "#0", "title", "is empty").into();
    assert!(!err.is_transient());
}

#[test]
fn boundary_string_prefixes_code() {
    let err = VigilError::invalid_payload("expected an array");
    assert!(err.boundary_string().starts_with("[INVALID_PAYLOAD]"));
}

#[test]
fn record_reference_names_the_recommendation() {
    let err = VigilError::invalid_record_reference("recommendation 9 does not exist");
    assert!(err.to_string().starts_with("Invalid recommendation ID"));
    assert_eq!(err.error_type(), "reference");
}
