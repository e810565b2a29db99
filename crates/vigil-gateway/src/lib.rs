//! # vigil-gateway
//!
//! The call contract front-ends use to reach the recommendation store.
//! Owns `VigilRuntime` (storage, monitor, persistence, health reporter,
//! flow harness) and turns every outcome into a `{success, ...}` response.
//!
//! ## Architecture
//!
//! - `runtime.rs`: `VigilRuntime` and its optional process-wide singleton
//! - `bindings/`: one async function per boundary call
//! - `conversions/`: response shapes and error mapping
//! - `dispatch.rs`: `Gateway::dispatch(command, args)` over JSON

pub mod bindings;
pub mod conversions;
pub mod dispatch;
pub mod runtime;

pub use dispatch::Gateway;
pub use runtime::{RuntimeOptions, VigilRuntime};
