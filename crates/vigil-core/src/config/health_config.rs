use serde::{Deserialize, Serialize};

use super::defaults;

/// Health monitor thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Maximum metrics retained in the rolling window.
    pub window_capacity: usize,
    /// Failures returned by performance stats.
    pub recent_failures_limit: usize,
    /// Success rate at or above which the window can be healthy.
    pub healthy_success_rate: f64,
    /// Success rate below which the window is critical.
    pub critical_success_rate: f64,
    /// Average latency above which the window is at least a warning.
    pub warning_latency_ms: f64,
    /// Consecutive trailing failures that make the window critical.
    pub critical_failure_streak: usize,
    /// Live probe latency above which a probe reports a warning.
    pub slow_probe_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            window_capacity: defaults::DEFAULT_WINDOW_CAPACITY,
            recent_failures_limit: defaults::DEFAULT_RECENT_FAILURES_LIMIT,
            healthy_success_rate: defaults::DEFAULT_HEALTHY_SUCCESS_RATE,
            critical_success_rate: defaults::DEFAULT_CRITICAL_SUCCESS_RATE,
            warning_latency_ms: defaults::DEFAULT_WARNING_LATENCY_MS,
            critical_failure_streak: defaults::DEFAULT_CRITICAL_FAILURE_STREAK,
            slow_probe_ms: defaults::DEFAULT_SLOW_PROBE_MS,
        }
    }
}
