//! Create, look up, and delete parent analyses.

use rusqlite::{params, Connection, OptionalExtension};

use vigil_core::errors::VigilResult;
use vigil_core::records::{AnalysisId, AnalysisRecord};

use crate::sql_err;

/// Insert an analysis. With `explicit_id` the row takes that id, otherwise
/// the store assigns one.
pub fn create_analysis(
    conn: &Connection,
    label: &str,
    explicit_id: Option<i64>,
) -> VigilResult<AnalysisId> {
    conn.execute(
        "INSERT INTO analyses (id, label) VALUES (?1, ?2)",
        params![explicit_id, label],
    )
    .map_err(sql_err("create_analysis"))?;
    AnalysisId::new(conn.last_insert_rowid())
}

pub fn get_analysis(conn: &Connection, id: AnalysisId) -> VigilResult<Option<AnalysisRecord>> {
    conn.query_row(
        "SELECT id, label, created_at FROM analyses WHERE id = ?1",
        params![id.value()],
        |row| {
            Ok(AnalysisRecord {
                id: row.get(0)?,
                label: row.get(1)?,
                created_at: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(sql_err("get_analysis"))
}

pub fn analysis_exists(conn: &Connection, id: AnalysisId) -> VigilResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM analyses WHERE id = ?1",
            params![id.value()],
            |row| row.get(0),
        )
        .optional()
        .map_err(sql_err("analysis_exists"))?;
    Ok(found.is_some())
}

/// Delete an analysis; its recommendations go with it (ON DELETE CASCADE).
pub fn delete_analysis(conn: &Connection, id: AnalysisId) -> VigilResult<bool> {
    let changed = conn
        .execute("DELETE FROM analyses WHERE id = ?1", params![id.value()])
        .map_err(sql_err("delete_analysis"))?;
    Ok(changed > 0)
}
