//! Bounded retry with exponential backoff for reads.

use std::future::Future;
use std::time::Duration;

use vigil_core::config::PersistenceConfig;
use vigil_core::errors::{VigilError, VigilResult};

/// Retry policy for store reads. Writes are never retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Initial backoff duration (doubles each retry).
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &PersistenceConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: config.initial_backoff(),
            max_backoff: config.max_backoff(),
        }
    }

    /// Delay before retry number `retry` (1-based).
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Run `op` until it succeeds, fails permanently, or retries run out.
    ///
    /// Only transient errors are retried. When they persist past the last
    /// retry the result is `StoreUnavailable`. Returns the value and the
    /// number of attempts made.
    pub async fn run<T, F, Fut, R>(&self, mut op: F, mut on_retry: R) -> VigilResult<(T, u32)>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = VigilResult<T>>,
        R: FnMut(u32, Duration, &VigilError),
    {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => return Ok((value, attempt)),
                Err(e) if e.is_transient() => {
                    if attempt > self.max_retries {
                        return Err(VigilError::StoreUnavailable {
                            attempts: attempt,
                            reason: e.to_string(),
                        });
                    }
                    let backoff = self.backoff_for(attempt);
                    on_retry(attempt, backoff, &e);
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&PersistenceConfig::default())
    }
}
