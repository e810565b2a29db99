//! # vigil-harness
//!
//! Drives the full save, fetch, audit and cleanup cycle against synthetic
//! records through the same persistence path the gateway uses, and reports
//! per-phase pass/fail with timings.

pub mod synthetic;
pub mod verifier;

pub use verifier::FlowVerifier;
