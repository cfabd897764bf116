//! Versioned schema migrations, tracked via `PRAGMA user_version`.

mod v001_fleet_tables;
mod v002_alert_tables;
mod v003_ops_tables;

use rusqlite::Connection;

use vigil_core::errors::{StorageError, VigilError, VigilResult};

use crate::to_storage_err;

type Migration = fn(&Connection) -> VigilResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_fleet_tables::migrate),
    (2, v002_alert_tables::migrate),
    (3, v003_ops_tables::migrate),
];

/// Apply every migration newer than the database's current version.
pub fn run_migrations(conn: &Connection) -> VigilResult<()> {
    let current: u32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            VigilError::Storage(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version = *version, "migration applied");
    }
    Ok(())
}
