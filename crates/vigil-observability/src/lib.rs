//! # vigil-observability
//!
//! Health reporting for the recommendation read/write path: an in-memory
//! rolling window of operation metrics, status derivation on demand, live
//! probes against the store, and structured tracing with named events.

pub mod health;
pub mod monitor;
pub mod tracing_setup;

pub use health::{StoreProbes, SystemHealthReporter};
pub use monitor::HealthMonitor;
