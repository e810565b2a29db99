//! Versioned schema migrations, applied in order at startup.

pub mod v001_initial_schema;
pub mod v002_recommendation_indexes;

use rusqlite::{params, Connection};

use vigil_core::errors::{StorageError, VigilResult};

use crate::sql_err;

type MigrationFn = fn(&Connection) -> VigilResult<()>;

const MIGRATIONS: &[(u32, MigrationFn)] = &[
    (1, v001_initial_schema::migrate),
    (2, v002_recommendation_indexes::migrate),
];

/// Highest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Current schema version, 0 on a fresh database.
pub fn current_version(conn: &Connection) -> VigilResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(sql_err("schema_version"))?;
    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .map_err(sql_err("current_version"))?;
    Ok(version.unwrap_or(0))
}

/// Apply every pending migration, each in its own transaction.
/// Returns the number of migrations applied.
pub fn run_migrations(conn: &Connection) -> VigilResult<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;
    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(sql_err("migration begin"))?;
        if let Err(e) = migrate(&tx) {
            let _ = tx.rollback();
            return Err(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            }
            .into());
        }
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(sql_err("record schema_version"))?;
        tx.commit().map_err(sql_err("migration commit"))?;
        tracing::debug!(version = *version, "applied migration");
        applied += 1;
    }
    Ok(applied)
}
