use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Persistence operations observed by the health monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Save,
    Fetch,
    Update,
    Delete,
}

impl OperationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Fetch => "fetch",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// One observation of a persistence operation.
///
/// Built through [`HealthMetric::succeeded`] or [`HealthMetric::failed`] so
/// that `error_message` is present exactly when `success` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetric {
    pub operation_type: OperationType,
    pub duration_ms: u64,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub analysis_id: Option<i64>,
    pub record_count: Option<usize>,
    pub error_message: Option<String>,
}

impl HealthMetric {
    pub fn succeeded(operation_type: OperationType, duration_ms: u64) -> Self {
        Self {
            operation_type,
            duration_ms,
            success: true,
            timestamp: Utc::now(),
            analysis_id: None,
            record_count: None,
            error_message: None,
        }
    }

    pub fn failed(
        operation_type: OperationType,
        duration_ms: u64,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            operation_type,
            duration_ms,
            success: false,
            timestamp: Utc::now(),
            analysis_id: None,
            record_count: None,
            error_message: Some(error_message.into()),
        }
    }

    pub fn for_analysis(mut self, analysis_id: i64) -> Self {
        self.analysis_id = Some(analysis_id);
        self
    }

    pub fn with_record_count(mut self, count: usize) -> Self {
        self.record_count = Some(count);
        self
    }
}
