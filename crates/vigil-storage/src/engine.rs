//! StorageEngine: owns the ConnectionPool, implements IRecommendationStorage,
//! runs migrations at startup.

use std::path::Path;

use vigil_core::config::StorageConfig;
use vigil_core::errors::VigilResult;
use vigil_core::records::{
    AnalysisId, AnalysisRecord, RecommendationRow, RecommendationStatus, ValidatedRecommendation,
};
use vigil_core::traits::IRecommendationStorage;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{analysis_ops, maintenance, recommendation_crud};

/// The record store. Writes go through the single writer; reads use the
/// read pool when the database is file-backed.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk with default settings.
    pub fn open(path: &Path) -> VigilResult<Self> {
        let config = StorageConfig {
            db_path: path.display().to_string(),
            ..StorageConfig::default()
        };
        Self::open_with_config(&config)
    }

    /// Open the database named by `config.db_path`.
    pub fn open_with_config(config: &StorageConfig) -> VigilResult<Self> {
        let path = Path::new(&config.db_path);
        let mut pool = ConnectionPool::open(path, config.busy_timeout_ms)?;
        Self::initialize(&pool)?;
        // Readers open after migrations so they never see a half-built schema.
        pool.attach_readers(config.read_pool_size, config.busy_timeout_ms)?;
        tracing::info!(db_path = %config.db_path, "storage engine opened");
        Ok(Self { pool })
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> VigilResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        Self::initialize(&pool)?;
        Ok(Self { pool })
    }

    fn initialize(pool: &ConnectionPool) -> VigilResult<()> {
        pool.writer.with_conn_sync(|conn| {
            let applied = migrations::run_migrations(conn)?;
            if applied > 0 {
                tracing::debug!(applied, "schema migrated");
            }
            Ok(())
        })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> VigilResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> VigilResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }

    fn with_writer<F, T>(&self, f: F) -> VigilResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> VigilResult<T>,
    {
        self.pool.writer.with_conn_sync(f)
    }
}

impl IRecommendationStorage for StorageEngine {
    fn create_analysis(&self, label: &str, explicit_id: Option<i64>) -> VigilResult<AnalysisId> {
        self.with_writer(|conn| analysis_ops::create_analysis(conn, label, explicit_id))
    }

    fn get_analysis(&self, id: AnalysisId) -> VigilResult<Option<AnalysisRecord>> {
        self.with_reader(|conn| analysis_ops::get_analysis(conn, id))
    }

    fn analysis_exists(&self, id: AnalysisId) -> VigilResult<bool> {
        self.with_reader(|conn| analysis_ops::analysis_exists(conn, id))
    }

    fn delete_analysis(&self, id: AnalysisId) -> VigilResult<bool> {
        self.with_writer(|conn| analysis_ops::delete_analysis(conn, id))
    }

    fn insert_batch(
        &self,
        analysis_id: AnalysisId,
        records: &[ValidatedRecommendation],
    ) -> VigilResult<Vec<i64>> {
        self.with_writer(|conn| recommendation_crud::insert_batch(conn, analysis_id, records))
    }

    fn fetch_by_analysis(&self, analysis_id: AnalysisId) -> VigilResult<Vec<RecommendationRow>> {
        self.with_reader(|conn| recommendation_crud::fetch_by_analysis(conn, analysis_id))
    }

    fn count_by_analysis(&self, analysis_id: AnalysisId) -> VigilResult<usize> {
        self.with_reader(|conn| recommendation_crud::count_by_analysis(conn, analysis_id))
    }

    fn get_recommendation(&self, record_id: i64) -> VigilResult<Option<RecommendationRow>> {
        self.with_reader(|conn| recommendation_crud::get_recommendation(conn, record_id))
    }

    fn update_status(&self, record_id: i64, status: RecommendationStatus) -> VigilResult<bool> {
        self.with_writer(|conn| recommendation_crud::update_status(conn, record_id, status))
    }

    fn delete_by_analysis(&self, analysis_id: AnalysisId) -> VigilResult<usize> {
        self.with_writer(|conn| recommendation_crud::delete_by_analysis(conn, analysis_id))
    }

    fn ping(&self) -> VigilResult<()> {
        self.with_reader(maintenance::ping)
    }

    fn total_recommendations(&self) -> VigilResult<usize> {
        self.with_reader(maintenance::total_recommendations)
    }

    fn integrity_check(&self) -> VigilResult<Vec<String>> {
        self.with_reader(maintenance::integrity_check)
    }
}
