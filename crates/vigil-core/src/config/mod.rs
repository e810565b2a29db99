pub mod defaults;
pub mod harness_config;
pub mod health_config;
pub mod persistence_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use harness_config::HarnessConfig;
pub use health_config::HealthConfig;
pub use persistence_config::PersistenceConfig;
pub use storage_config::StorageConfig;

use crate::errors::{VigilError, VigilResult};

/// Top-level configuration, one section per subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VigilConfig {
    pub storage: StorageConfig,
    pub persistence: PersistenceConfig,
    pub health: HealthConfig,
    pub harness: HarnessConfig,
}

impl VigilConfig {
    /// Parse from a TOML string. Missing sections and keys fall back to defaults.
    pub fn from_toml(s: &str) -> VigilResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| VigilError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn load(path: &Path) -> VigilResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            VigilError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&raw)
    }

    /// Reject values that would make the subsystem unusable.
    pub fn validate(&self) -> VigilResult<()> {
        if self.health.window_capacity == 0 {
            return Err(VigilError::ConfigError(
                "health.window_capacity must be at least 1".into(),
            ));
        }
        if self.persistence.fetch_timeout_ms == 0 {
            return Err(VigilError::ConfigError(
                "persistence.fetch_timeout_ms must be positive".into(),
            ));
        }
        let h = &self.health;
        if !(0.0..=1.0).contains(&h.critical_success_rate)
            || !(0.0..=1.0).contains(&h.healthy_success_rate)
            || h.critical_success_rate > h.healthy_success_rate
        {
            return Err(VigilError::ConfigError(
                "health success-rate thresholds must satisfy 0 <= critical <= healthy <= 1".into(),
            ));
        }
        Ok(())
    }
}
