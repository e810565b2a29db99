use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Persistence layer configuration: read budget and retry policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Hard budget for a single fetch, including retries.
    pub fetch_timeout_ms: u64,
    /// Retries after the first attempt when the store is unavailable.
    pub max_retries: u32,
    /// Initial backoff (doubles each retry).
    pub initial_backoff_ms: u64,
    /// Backoff ceiling.
    pub max_backoff_ms: u64,
    /// Re-read the store after every committed save.
    pub verify_after_save: bool,
}

impl PersistenceConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: defaults::DEFAULT_FETCH_TIMEOUT_MS,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            initial_backoff_ms: defaults::DEFAULT_INITIAL_BACKOFF_MS,
            max_backoff_ms: defaults::DEFAULT_MAX_BACKOFF_MS,
            verify_after_save: defaults::DEFAULT_VERIFY_AFTER_SAVE,
        }
    }
}
