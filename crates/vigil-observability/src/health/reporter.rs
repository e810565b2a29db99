//! Aggregate system health: live probes plus the metric-derived view.

use std::sync::Arc;

use chrono::Utc;
use vigil_core::models::{ComponentHealth, HealthStatus, PerformanceHealth, SystemHealthStatus};
use vigil_core::traits::IRecommendationStorage;

use super::probes::StoreProbes;
use crate::monitor::HealthMonitor;

/// Builds a [`SystemHealthStatus`] on demand. Holds no state of its own.
pub struct SystemHealthReporter {
    storage: Arc<dyn IRecommendationStorage>,
    monitor: Arc<HealthMonitor>,
}

impl SystemHealthReporter {
    pub fn new(storage: Arc<dyn IRecommendationStorage>, monitor: Arc<HealthMonitor>) -> Self {
        Self { storage, monitor }
    }

    /// Run both probes and read the monitor. Blocks on the store; async
    /// callers run this on a blocking task.
    pub fn check(&self) -> SystemHealthStatus {
        let probes = StoreProbes::new(self.storage.as_ref(), self.monitor.config().slow_probe_ms);
        let database = probes.check_database();
        let recommendations = probes.check_recommendations();
        let performance = self.performance();
        let overall = Self::derive_overall(&[&database, &recommendations], &performance);

        SystemHealthStatus {
            overall,
            database,
            recommendations,
            performance,
            timestamp: Utc::now(),
        }
    }

    fn performance(&self) -> PerformanceHealth {
        let stats = self.monitor.performance_stats();
        let assessment = crate::monitor::status::evaluate(&stats, self.monitor.config());
        let (status, message) = match assessment {
            Some(a) => (a.status, a.reason),
            None => (HealthStatus::Healthy, "no operations recorded".to_string()),
        };
        PerformanceHealth {
            status,
            message: Some(message),
            stats,
        }
    }

    /// Overall is the worst of the components.
    fn derive_overall(components: &[&ComponentHealth], performance: &PerformanceHealth) -> HealthStatus {
        components
            .iter()
            .map(|c| c.status)
            .fold(performance.status, HealthStatus::worst)
    }
}
