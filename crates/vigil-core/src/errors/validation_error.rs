/// A single rejected record in a save batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record {index} ({external_id}): field '{field}' {reason}")]
pub struct ValidationError {
    /// Zero-based position of the record in the submitted batch.
    pub index: usize,
    /// External id as submitted, or `#<index>` when absent.
    pub external_id: String,
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(
        index: usize,
        external_id: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            index,
            external_id: external_id.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}
