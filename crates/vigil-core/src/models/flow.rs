use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The five phases of a flow-verification run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum FlowPhase {
    Setup,
    Save,
    Fetch,
    Validate,
    Cleanup,
}

impl FlowPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Save => "save",
            Self::Fetch => "fetch",
            Self::Validate => "validate",
            Self::Cleanup => "cleanup",
        }
    }
}

/// Outcome of a single phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PhaseResult {
    pub success: bool,
    pub duration_ms: u64,
    pub errors: Vec<String>,
    /// Phase did not run because an earlier phase failed.
    pub skipped: bool,
}

impl PhaseResult {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            duration_ms: 0,
            errors: vec![reason.into()],
            skipped: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlowPhases {
    pub setup: PhaseResult,
    pub save: PhaseResult,
    pub fetch: PhaseResult,
    pub validate: PhaseResult,
    pub cleanup: PhaseResult,
}

impl FlowPhases {
    pub fn get(&self, phase: FlowPhase) -> &PhaseResult {
        match phase {
            FlowPhase::Setup => &self.setup,
            FlowPhase::Save => &self.save,
            FlowPhase::Fetch => &self.fetch,
            FlowPhase::Validate => &self.validate,
            FlowPhase::Cleanup => &self.cleanup,
        }
    }

    pub fn get_mut(&mut self, phase: FlowPhase) -> &mut PhaseResult {
        match phase {
            FlowPhase::Setup => &mut self.setup,
            FlowPhase::Save => &mut self.save,
            FlowPhase::Fetch => &mut self.fetch,
            FlowPhase::Validate => &mut self.validate,
            FlowPhase::Cleanup => &mut self.cleanup,
        }
    }

    /// Overall success: cleanup is excluded.
    pub fn functional_success(&self) -> bool {
        self.setup.success && self.save.success && self.fetch.success && self.validate.success
    }
}

/// Aggregate timing and integrity for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FlowMetrics {
    pub total_time_ms: u64,
    pub save_time_ms: u64,
    pub fetch_time_ms: u64,
    pub record_count: usize,
    pub integrity_score: u32,
}

/// Report of one harness run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FlowVerificationResult {
    pub run_id: String,
    pub analysis_id: Option<i64>,
    pub success: bool,
    pub phases: FlowPhases,
    pub metrics: FlowMetrics,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl FlowVerificationResult {
    /// All errors across phases, prefixed with the phase name.
    pub fn all_errors(&self) -> Vec<String> {
        [
            FlowPhase::Setup,
            FlowPhase::Save,
            FlowPhase::Fetch,
            FlowPhase::Validate,
            FlowPhase::Cleanup,
        ]
        .into_iter()
        .flat_map(|phase| {
            self.phases
                .get(phase)
                .errors
                .iter()
                .map(move |e| format!("{}: {e}", phase.as_str()))
        })
        .collect()
    }
}
