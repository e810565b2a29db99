//! HealthMonitor: rolling in-memory record of persistence operations.
//!
//! Constructed explicitly and shared as `Arc<HealthMonitor>`. The window is
//! guarded by a plain mutex held only for the push or the scan.

pub mod status;
pub mod window;

use std::sync::{Mutex, MutexGuard};

use vigil_core::config::HealthConfig;
use vigil_core::models::{HealthMetric, HealthStatus, OperationCounts, PerformanceStats};

use crate::tracing_setup::events;

pub use status::Assessment;
pub use window::MetricWindow;

pub struct HealthMonitor {
    window: Mutex<MetricWindow>,
    config: HealthConfig,
}

impl HealthMonitor {
    pub fn new(config: HealthConfig) -> Self {
        Self {
            window: Mutex::new(MetricWindow::with_capacity(config.window_capacity)),
            config,
        }
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Append one metric, evicting the oldest when the window is full.
    pub fn record_metric(&self, metric: HealthMetric) {
        if !metric.success {
            tracing::debug!(
                event = "operation_failed",
                operation = metric.operation_type.as_str(),
                duration_ms = metric.duration_ms,
                error = metric.error_message.as_deref().unwrap_or_default(),
                "persistence operation failed"
            );
        }
        self.lock().push(metric);
    }

    /// Statistics over the current window, recomputed on every call.
    pub fn performance_stats(&self) -> PerformanceStats {
        let window = self.lock();
        if window.is_empty() {
            return PerformanceStats::empty();
        }

        let total = window.len();
        let mut successes = 0usize;
        let mut total_ms = 0u128;
        let mut by_type = OperationCounts::default();
        for metric in window.iter() {
            if metric.success {
                successes += 1;
            }
            total_ms += u128::from(metric.duration_ms);
            by_type.increment(metric.operation_type);
        }
        let recent_failures: Vec<HealthMetric> = window
            .iter()
            .rev()
            .filter(|m| !m.success)
            .take(self.config.recent_failures_limit)
            .cloned()
            .collect();
        let consecutive_failures = window.iter().rev().take_while(|m| !m.success).count();
        drop(window);

        let mut stats = PerformanceStats {
            total_operations: total,
            success_rate: successes as f64 / total as f64,
            average_duration_ms: total_ms as f64 / total as f64,
            operations_by_type: by_type,
            recent_failures,
            consecutive_failures,
            current_status: None,
        };
        stats.current_status = status::evaluate(&stats, &self.config).map(|a| a.status);
        stats
    }

    /// Status with the rule that produced it; `None` after a reset.
    pub fn assess(&self) -> Option<Assessment> {
        status::evaluate(&self.performance_stats(), &self.config)
    }

    pub fn current_status(&self) -> Option<HealthStatus> {
        self.performance_stats().current_status
    }

    /// Clear the window. Status becomes unset until the next metric.
    pub fn reset(&self) {
        let cleared = {
            let mut window = self.lock();
            let n = window.len();
            window.clear();
            n
        };
        events::monitor_reset(cleared);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, MetricWindow> {
        // A panic while holding the guard cannot leave the ring half-written.
        self.window.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new(HealthConfig::default())
    }
}
