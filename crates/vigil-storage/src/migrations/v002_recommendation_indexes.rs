//! v002: lookup indexes for per-analysis reads and status filtering.

use rusqlite::Connection;

use vigil_core::errors::VigilResult;

use crate::sql_err;

pub fn migrate(conn: &Connection) -> VigilResult<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_recommendations_analysis ON recommendations(analysis_id, id);
        CREATE INDEX IF NOT EXISTS idx_recommendations_status ON recommendations(status);
        ",
    )
    .map_err(sql_err("v002_recommendation_indexes"))?;
    Ok(())
}
