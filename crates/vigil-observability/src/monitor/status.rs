//! Health status derived from window statistics.
//!
//! Critical: success rate below `critical_success_rate`, or a trailing run of
//! at least `critical_failure_streak` failures.
//! Warning: success rate below `healthy_success_rate`, or average latency
//! above `warning_latency_ms`.

use vigil_core::config::HealthConfig;
use vigil_core::models::{HealthStatus, PerformanceStats};

/// A status with the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub status: HealthStatus,
    pub reason: String,
}

/// `None` when there is nothing to judge.
pub fn evaluate(stats: &PerformanceStats, config: &HealthConfig) -> Option<Assessment> {
    if stats.total_operations == 0 {
        return None;
    }
    let pct = stats.success_rate * 100.0;

    let (status, reason) = if stats.success_rate < config.critical_success_rate {
        (
            HealthStatus::Critical,
            format!("success rate {pct:.1}% is below the critical threshold"),
        )
    } else if config.critical_failure_streak > 0
        && stats.consecutive_failures >= config.critical_failure_streak
    {
        (
            HealthStatus::Critical,
            format!("{} consecutive failures", stats.consecutive_failures),
        )
    } else if stats.success_rate < config.healthy_success_rate {
        (
            HealthStatus::Warning,
            format!("success rate {pct:.1}% is degraded"),
        )
    } else if stats.average_duration_ms > config.warning_latency_ms {
        (
            HealthStatus::Warning,
            format!(
                "average latency {:.0}ms exceeds {:.0}ms",
                stats.average_duration_ms, config.warning_latency_ms
            ),
        )
    } else {
        (
            HealthStatus::Healthy,
            format!("{} operations, success rate {pct:.1}%", stats.total_operations),
        )
    };
    Some(Assessment { status, reason })
}
