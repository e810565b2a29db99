use serde::{Deserialize, Serialize};

use super::defaults;

/// Flow-verification harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Synthetic records written per run.
    pub record_count: usize,
    /// Wall-clock budget for a whole run; exceeding it is reported as an error.
    pub max_duration_ms: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            record_count: defaults::DEFAULT_HARNESS_RECORD_COUNT,
            max_duration_ms: defaults::DEFAULT_HARNESS_MAX_DURATION_MS,
        }
    }
}
