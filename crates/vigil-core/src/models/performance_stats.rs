use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::health_metric::{HealthMetric, OperationType};
use super::health_report::HealthStatus;

/// Operation counts per type within the current window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OperationCounts {
    pub save: usize,
    pub fetch: usize,
    pub update: usize,
    pub delete: usize,
}

impl OperationCounts {
    pub fn increment(&mut self, op: OperationType) {
        match op {
            OperationType::Save => self.save += 1,
            OperationType::Fetch => self.fetch += 1,
            OperationType::Update => self.update += 1,
            OperationType::Delete => self.delete += 1,
        }
    }

    pub fn get(&self, op: OperationType) -> usize {
        match op {
            OperationType::Save => self.save,
            OperationType::Fetch => self.fetch,
            OperationType::Update => self.update,
            OperationType::Delete => self.delete,
        }
    }
}

/// Aggregate over the current metric window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    pub total_operations: usize,
    /// successes / total, 0.0 when the window is empty.
    pub success_rate: f64,
    pub average_duration_ms: f64,
    pub operations_by_type: OperationCounts,
    /// Most recent first, bounded.
    pub recent_failures: Vec<HealthMetric>,
    /// Trailing run of failures at the newest end of the window.
    pub consecutive_failures: usize,
    /// `None` when the window is empty.
    pub current_status: Option<HealthStatus>,
}

impl PerformanceStats {
    pub fn empty() -> Self {
        Self {
            total_operations: 0,
            success_rate: 0.0,
            average_duration_ms: 0.0,
            operations_by_type: OperationCounts::default(),
            recent_failures: Vec::new(),
            consecutive_failures: 0,
            current_status: None,
        }
    }
}
