//! v001: analyses, recommendations, schema_version.

use rusqlite::Connection;

use vigil_core::errors::VigilResult;

use crate::sql_err;

pub fn migrate(conn: &Connection) -> VigilResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS analyses (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            label       TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS recommendations (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            analysis_id   INTEGER NOT NULL,
            external_id   TEXT NOT NULL,
            title         TEXT NOT NULL,
            priority      TEXT NOT NULL,
            category      TEXT NOT NULL,
            effort        TEXT NOT NULL,
            status        TEXT NOT NULL DEFAULT 'pending',
            payload       TEXT NOT NULL DEFAULT '{}',
            payload_hash  TEXT NOT NULL,
            created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            UNIQUE (analysis_id, external_id),
            FOREIGN KEY (analysis_id) REFERENCES analyses(id) ON DELETE CASCADE
        );
        ",
    )
    .map_err(sql_err("v001_initial_schema"))?;
    Ok(())
}
