//! Health checking: live store probes and the aggregate reporter.

pub mod probes;
pub mod reporter;

pub use probes::StoreProbes;
pub use reporter::SystemHealthReporter;
