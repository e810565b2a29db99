// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "vigil.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Persistence ---
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 100;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 2_000;
pub const DEFAULT_VERIFY_AFTER_SAVE: bool = true;

// --- Health ---
pub const DEFAULT_WINDOW_CAPACITY: usize = 1_000;
pub const DEFAULT_RECENT_FAILURES_LIMIT: usize = 10;
pub const DEFAULT_HEALTHY_SUCCESS_RATE: f64 = 0.95;
pub const DEFAULT_CRITICAL_SUCCESS_RATE: f64 = 0.80;
pub const DEFAULT_WARNING_LATENCY_MS: f64 = 1_000.0;
pub const DEFAULT_CRITICAL_FAILURE_STREAK: usize = 5;
pub const DEFAULT_SLOW_PROBE_MS: u64 = 500;

// --- Harness ---
pub const DEFAULT_HARNESS_RECORD_COUNT: usize = 10;
pub const DEFAULT_HARNESS_MAX_DURATION_MS: u64 = 10_000;
