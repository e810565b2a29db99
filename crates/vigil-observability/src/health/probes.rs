//! Live round trips against the store, each timed and classified on its own.
//! Each returns healthy | warning | critical.

use std::time::Instant;

use vigil_core::models::{ComponentHealth, HealthStatus};
use vigil_core::traits::IRecommendationStorage;

/// Probes the store directly, bypassing the persistence layer and its metrics.
pub struct StoreProbes<'a> {
    storage: &'a dyn IRecommendationStorage,
    slow_probe_ms: u64,
}

impl<'a> StoreProbes<'a> {
    pub fn new(storage: &'a dyn IRecommendationStorage, slow_probe_ms: u64) -> Self {
        Self {
            storage,
            slow_probe_ms,
        }
    }

    /// Database: critical if the ping fails, warning if slower than the probe budget.
    pub fn check_database(&self) -> ComponentHealth {
        let start = Instant::now();
        let result = self.storage.ping();
        let elapsed = start.elapsed().as_millis() as u64;
        match result {
            Ok(()) => self.classify("database", elapsed, "store reachable".into()),
            Err(e) => ComponentHealth {
                name: "database".into(),
                status: HealthStatus::Critical,
                response_time_ms: elapsed,
                message: Some(format!("ping failed: {e}")),
            },
        }
    }

    /// Recommendations table: critical if it cannot be counted.
    pub fn check_recommendations(&self) -> ComponentHealth {
        let start = Instant::now();
        let result = self.storage.total_recommendations();
        let elapsed = start.elapsed().as_millis() as u64;
        match result {
            Ok(total) => self.classify(
                "recommendations",
                elapsed,
                format!("{total} recommendations stored"),
            ),
            Err(e) => ComponentHealth {
                name: "recommendations".into(),
                status: HealthStatus::Critical,
                response_time_ms: elapsed,
                message: Some(format!("count query failed: {e}")),
            },
        }
    }

    fn classify(&self, name: &str, elapsed_ms: u64, ok_message: String) -> ComponentHealth {
        let (status, message) = if elapsed_ms > self.slow_probe_ms {
            (
                HealthStatus::Warning,
                format!("slow response ({elapsed_ms}ms > {}ms)", self.slow_probe_ms),
            )
        } else {
            (HealthStatus::Healthy, ok_message)
        };
        ComponentHealth {
            name: name.into(),
            status,
            response_time_ms: elapsed_ms,
            message: Some(message),
        }
    }
}
