use crate::errors::VigilResult;
use crate::records::{
    AnalysisId, AnalysisRecord, RecommendationRow, RecommendationStatus, ValidatedRecommendation,
};

/// Record Store contract used by every higher layer.
///
/// Implementations must make `insert_batch` all-or-nothing: either every
/// record is committed or none is.
pub trait IRecommendationStorage: Send + Sync {
    // --- Analyses ---
    fn create_analysis(&self, label: &str, explicit_id: Option<i64>) -> VigilResult<AnalysisId>;
    fn get_analysis(&self, id: AnalysisId) -> VigilResult<Option<AnalysisRecord>>;
    fn analysis_exists(&self, id: AnalysisId) -> VigilResult<bool>;
    /// Deletes the analysis and, by cascade, its recommendations.
    fn delete_analysis(&self, id: AnalysisId) -> VigilResult<bool>;

    // --- Recommendations ---
    /// Insert in one transaction. Returns store-assigned ids in insertion order.
    fn insert_batch(
        &self,
        analysis_id: AnalysisId,
        records: &[ValidatedRecommendation],
    ) -> VigilResult<Vec<i64>>;
    /// All rows for an analysis in creation order.
    fn fetch_by_analysis(&self, analysis_id: AnalysisId) -> VigilResult<Vec<RecommendationRow>>;
    fn count_by_analysis(&self, analysis_id: AnalysisId) -> VigilResult<usize>;
    fn get_recommendation(&self, record_id: i64) -> VigilResult<Option<RecommendationRow>>;
    /// Returns false when no row has that id.
    fn update_status(&self, record_id: i64, status: RecommendationStatus) -> VigilResult<bool>;
    fn delete_by_analysis(&self, analysis_id: AnalysisId) -> VigilResult<usize>;

    // --- Maintenance ---
    /// Cheap round trip proving the store answers.
    fn ping(&self) -> VigilResult<()>;
    fn total_recommendations(&self) -> VigilResult<usize>;
    /// Problems reported by the engine's own integrity check; empty when clean.
    fn integrity_check(&self) -> VigilResult<Vec<String>>;
}
