//! Flow binding: verifyFlow.

use vigil_core::models::FlowVerificationResult;

use crate::runtime::VigilRuntime;

/// Run the harness once; `records` overrides the configured count.
pub async fn verify_flow(rt: &VigilRuntime, records: Option<usize>) -> FlowVerificationResult {
    match records {
        Some(n) => rt.harness.run_with(n).await,
        None => rt.harness.run().await,
    }
}
