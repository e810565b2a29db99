//! Batch insert, read-back, status update, and bulk delete for recommendations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use vigil_core::errors::{StorageError, VigilError, VigilResult};
use vigil_core::records::{
    AnalysisId, Payload, RecommendationRow, RecommendationStatus, ValidatedRecommendation,
};

use crate::queries::analysis_ops;
use crate::{classify_sqlite_err, sql_err};

const SELECT_COLUMNS: &str = "id, analysis_id, external_id, title, priority, category, effort,
     status, payload, payload_hash, created_at, updated_at";

/// Insert a batch for one analysis inside a single IMMEDIATE transaction.
///
/// Either every record is committed or none is. Returns store-assigned ids
/// in insertion order.
pub fn insert_batch(
    conn: &Connection,
    analysis_id: AnalysisId,
    records: &[ValidatedRecommendation],
) -> VigilResult<Vec<i64>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }
    conn.execute_batch("BEGIN IMMEDIATE")
        .map_err(|e| tx_err("begin", e))?;

    match insert_batch_inner(conn, analysis_id, records) {
        Ok(ids) => {
            if let Err(e) = conn.execute_batch("COMMIT") {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(tx_err("commit", e));
            }
            Ok(ids)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            tracing::warn!(
                analysis_id = analysis_id.value(),
                batch = records.len(),
                error = %e,
                "batch insert rolled back"
            );
            Err(e)
        }
    }
}

fn insert_batch_inner(
    conn: &Connection,
    analysis_id: AnalysisId,
    records: &[ValidatedRecommendation],
) -> VigilResult<Vec<i64>> {
    // Re-checked inside the transaction: the caller's check may be stale.
    if !analysis_ops::analysis_exists(conn, analysis_id)? {
        return Err(VigilError::invalid_reference(format!(
            "analysis {analysis_id} does not exist"
        )));
    }

    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO recommendations (
                analysis_id, external_id, title, priority, category, effort,
                status, payload, payload_hash
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .map_err(|e| tx_err("prepare insert", e))?;

    let mut ids = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        stmt.execute(params![
            analysis_id.value(),
            record.external_id,
            record.title,
            record.priority.as_str(),
            record.category,
            record.effort.as_str(),
            record.status.as_str(),
            record.payload.as_str(),
            record.payload.content_hash(),
        ])
        .map_err(|e| {
            tx_err(
                &format!("insert record {index} ({})", record.external_id),
                e,
            )
        })?;
        ids.push(conn.last_insert_rowid());
    }
    Ok(ids)
}

/// Wrap a failure inside a write transaction. Busy/locked stay classified as
/// unavailable; everything else is a transaction failure.
fn tx_err(stage: &str, err: rusqlite::Error) -> VigilError {
    match classify_sqlite_err(stage, err) {
        StorageError::SqliteError { message } => StorageError::TransactionFailed {
            stage: stage.to_string(),
            message,
        }
        .into(),
        other => other.into(),
    }
}

/// All recommendations for an analysis, oldest first.
pub fn fetch_by_analysis(
    conn: &Connection,
    analysis_id: AnalysisId,
) -> VigilResult<Vec<RecommendationRow>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {SELECT_COLUMNS} FROM recommendations WHERE analysis_id = ?1 ORDER BY id ASC"
        ))
        .map_err(sql_err("fetch_by_analysis prepare"))?;
    let rows = stmt
        .query_map(params![analysis_id.value()], row_to_recommendation)
        .map_err(sql_err("fetch_by_analysis"))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(sql_err("fetch_by_analysis row"))
}

pub fn count_by_analysis(conn: &Connection, analysis_id: AnalysisId) -> VigilResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM recommendations WHERE analysis_id = ?1",
            params![analysis_id.value()],
            |row| row.get(0),
        )
        .map_err(sql_err("count_by_analysis"))?;
    Ok(count as usize)
}

pub fn get_recommendation(
    conn: &Connection,
    record_id: i64,
) -> VigilResult<Option<RecommendationRow>> {
    conn.query_row(
        &format!("SELECT {SELECT_COLUMNS} FROM recommendations WHERE id = ?1"),
        params![record_id],
        row_to_recommendation,
    )
    .optional()
    .map_err(sql_err("get_recommendation"))
}

/// The only mutation allowed on an existing record.
pub fn update_status(
    conn: &Connection,
    record_id: i64,
    status: RecommendationStatus,
) -> VigilResult<bool> {
    let changed = conn
        .execute(
            "UPDATE recommendations
             SET status = ?2, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE id = ?1",
            params![record_id, status.as_str()],
        )
        .map_err(sql_err("update_status"))?;
    Ok(changed > 0)
}

pub fn delete_by_analysis(conn: &Connection, analysis_id: AnalysisId) -> VigilResult<usize> {
    conn.execute(
        "DELETE FROM recommendations WHERE analysis_id = ?1",
        params![analysis_id.value()],
    )
    .map_err(sql_err("delete_by_analysis"))
}

fn row_to_recommendation(row: &Row<'_>) -> rusqlite::Result<RecommendationRow> {
    Ok(RecommendationRow {
        id: row.get(0)?,
        analysis_id: row.get(1)?,
        external_id: row.get(2)?,
        title: row.get(3)?,
        priority: row.get(4)?,
        category: row.get(5)?,
        effort: row.get(6)?,
        status: row.get(7)?,
        payload: Payload::from_stored(row.get(8)?),
        payload_hash: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}
