pub mod consistency;
pub mod flow;
pub mod health_metric;
pub mod health_report;
pub mod outcomes;
pub mod performance_stats;
pub mod verification;

pub use consistency::{ConsistencyResult, CorruptedRecord};
pub use flow::{FlowMetrics, FlowPhase, FlowPhases, FlowVerificationResult, PhaseResult};
pub use health_metric::{HealthMetric, OperationType};
pub use health_report::{ComponentHealth, HealthStatus, PerformanceHealth, SystemHealthStatus};
pub use outcomes::{FetchMetadata, FetchOutcome, PerformanceRating, SaveOutcome};
pub use performance_stats::{OperationCounts, PerformanceStats};
pub use verification::VerificationResult;
