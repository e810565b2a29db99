//! # vigil-persistence
//!
//! The only writer of recommendation rows. Saves are validated, sanitized,
//! serialized through one write gate, committed in a single transaction and
//! verified by re-reading. Fetches retry transient store failures with
//! backoff inside a hard timeout. Every call records exactly one metric.

pub mod engine;
pub mod retry;
pub mod sanitize;
pub mod validate;

pub use engine::PersistenceEngine;
pub use retry::RetryPolicy;
