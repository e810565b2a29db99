//! # vigil-core
//!
//! Foundation crate for the Vigil recommendation store.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod records;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::VigilConfig;
pub use errors::{VigilError, VigilResult};
pub use records::{
    AnalysisId, Effort, Payload, Priority, RecommendationInput, RecommendationRow,
    RecommendationStatus, ValidatedRecommendation,
};
