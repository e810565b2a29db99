//! Structured log events for key system operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a committed save.
pub fn recommendations_saved(analysis_id: i64, saved: usize, duration_ms: u64) {
    tracing::info!(
        event = "recommendations_saved",
        analysis_id = analysis_id,
        saved = saved,
        duration_ms = duration_ms,
        "recommendations saved"
    );
}

/// Log a save rejected before any write.
pub fn save_rejected(analysis_id: Option<i64>, error_type: &str, reason: &str) {
    tracing::warn!(
        event = "save_rejected",
        analysis_id = ?analysis_id,
        error_type = %error_type,
        reason = %reason,
        "save rejected"
    );
}

/// A committed save whose re-read did not match. Alert only.
pub fn verification_mismatch(analysis_id: i64, expected: usize, actual: usize, issues: &[String]) {
    tracing::warn!(
        event = "verification_mismatch",
        analysis_id = analysis_id,
        expected = expected,
        actual = actual,
        issues = ?issues,
        "post-write verification mismatch"
    );
}

pub fn fetch_retry(analysis_id: i64, attempt: u32, backoff_ms: u64, error: &str) {
    tracing::warn!(
        event = "fetch_retry",
        analysis_id = analysis_id,
        attempt = attempt,
        backoff_ms = backoff_ms,
        error = %error,
        "store unavailable, retrying fetch"
    );
}

pub fn fetch_timeout(analysis_id: i64, budget_ms: u64) {
    tracing::warn!(
        event = "fetch_timeout",
        analysis_id = analysis_id,
        budget_ms = budget_ms,
        "fetch abandoned after timeout"
    );
}

/// Log records the auditor found damaged.
pub fn corruption_detected(analysis_id: i64, record_ids: &[i64], integrity_score: u32) {
    tracing::warn!(
        event = "corruption_detected",
        analysis_id = analysis_id,
        record_ids = ?record_ids,
        integrity_score = integrity_score,
        "corrupted recommendations detected"
    );
}

pub fn monitor_reset(cleared: usize) {
    tracing::info!(
        event = "monitor_reset",
        cleared = cleared,
        "health monitor reset"
    );
}

/// Log one harness phase.
pub fn flow_phase_completed(run_id: &str, phase: &str, success: bool, duration_ms: u64) {
    tracing::info!(
        event = "flow_phase_completed",
        run_id = %run_id,
        phase = %phase,
        success = success,
        duration_ms = duration_ms,
        "flow phase completed"
    );
}

pub fn flow_cleanup_failed(run_id: &str, analysis_id: i64, error: &str) {
    tracing::error!(
        event = "flow_cleanup_failed",
        run_id = %run_id,
        analysis_id = analysis_id,
        error = %error,
        "flow cleanup failed; synthetic data left behind"
    );
}
