//! Health bindings: healthCheck, healthMetrics, healthReset.

use std::sync::Arc;

use chrono::Utc;

use vigil_core::models::{
    ComponentHealth, HealthStatus, PerformanceHealth, PerformanceStats, SystemHealthStatus,
};

use crate::conversions::response_types::HealthResetResponse;
use crate::runtime::VigilRuntime;

/// Live probes plus the metric-derived view. Probes touch the store, so
/// they run on the blocking pool.
pub async fn health_check(rt: &VigilRuntime) -> SystemHealthStatus {
    let reporter = Arc::clone(&rt.reporter);
    match tokio::task::spawn_blocking(move || reporter.check()).await {
        Ok(status) => status,
        Err(e) => {
            tracing::error!(error = %e, "health check task failed");
            failed_check(format!("health check task failed: {e}"), rt.monitor.performance_stats())
        }
    }
}

pub fn health_metrics(rt: &VigilRuntime) -> PerformanceStats {
    rt.monitor.performance_stats()
}

pub fn health_reset(rt: &VigilRuntime) -> HealthResetResponse {
    let cleared = rt.monitor.len();
    rt.monitor.reset();
    HealthResetResponse {
        success: true,
        message: format!("Health metrics reset ({cleared} cleared)"),
    }
}

fn failed_check(reason: String, stats: PerformanceStats) -> SystemHealthStatus {
    let probe = |name: &str| ComponentHealth {
        name: name.to_string(),
        status: HealthStatus::Critical,
        response_time_ms: 0,
        message: Some(reason.clone()),
    };
    SystemHealthStatus {
        overall: HealthStatus::Critical,
        database: probe("database"),
        recommendations: probe("recommendations"),
        performance: PerformanceHealth {
            status: stats.current_status.unwrap_or(HealthStatus::Healthy),
            message: None,
            stats,
        },
        timestamp: Utc::now(),
    }
}
