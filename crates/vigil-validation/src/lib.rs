//! # vigil-validation
//!
//! Read-side checks over stored recommendations. Nothing here writes.
//!
//! ## Checks
//! 1. **Verification**: right after a save, the new rows are re-read and
//!    counted against the request.
//! 2. **Audit**: on demand, every row of an analysis is inspected field by
//!    field and scored.

pub mod auditor;
pub mod checks;
pub mod scoring;
pub mod verifier;

pub use auditor::{ConsistencyAuditor, Expectation};
pub use verifier::PostWriteVerifier;
