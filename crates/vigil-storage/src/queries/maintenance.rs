//! Liveness probe, integrity check, and table-wide counts.

use rusqlite::Connection;

use vigil_core::errors::VigilResult;

use crate::{sql_err, to_storage_err};

/// Round trip that touches the schema, not just the connection.
pub fn ping(conn: &Connection) -> VigilResult<()> {
    let tables: i64 = conn
        .query_row("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'", [], |row| {
            row.get(0)
        })
        .map_err(sql_err("ping"))?;
    if tables == 0 {
        return Err(to_storage_err("ping: schema is missing".to_string()));
    }
    Ok(())
}

pub fn total_recommendations(conn: &Connection) -> VigilResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM recommendations", [], |row| row.get(0))
        .map_err(sql_err("total_recommendations"))?;
    Ok(count as usize)
}

/// `PRAGMA integrity_check`; empty when the database reports "ok".
pub fn integrity_check(conn: &Connection) -> VigilResult<Vec<String>> {
    let mut stmt = conn
        .prepare("PRAGMA integrity_check")
        .map_err(sql_err("integrity_check prepare"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(sql_err("integrity_check"))?;
    let messages = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_err("integrity_check row"))?;
    Ok(messages.into_iter().filter(|m| m != "ok").collect())
}
