/// Vigil system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of records accepted in one save batch.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Maximum stored length of a recommendation title (chars).
pub const MAX_TITLE_LEN: usize = 500;

/// Maximum stored length of a category or external id (chars).
pub const MAX_SHORT_FIELD_LEN: usize = 100;

/// Prefix used when a record arrives without an external id.
pub const EXTERNAL_ID_PREFIX: &str = "rec_";

/// Integrity score penalty per record of count mismatch.
pub const COUNT_MISMATCH_PENALTY: u32 = 10;

/// Integrity score penalty per corrupted record.
pub const CORRUPTION_PENALTY: u32 = 15;

/// Fetch latency rating boundaries (ms).
pub const RATING_EXCELLENT_MS: u64 = 50;
pub const RATING_GOOD_MS: u64 = 200;
pub const RATING_FAIR_MS: u64 = 1_000;
