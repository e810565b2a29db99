//! Recommendation records and their field types.

pub mod analysis_id;
pub mod effort;
pub mod input;
pub mod payload;
pub mod priority;
pub mod row;
pub mod status;

pub use analysis_id::AnalysisId;
pub use effort::Effort;
pub use input::{RecommendationInput, ValidatedRecommendation};
pub use payload::Payload;
pub use priority::Priority;
pub use row::{AnalysisRecord, RecommendationRow};
pub use status::RecommendationStatus;
