//! Append-only audit log for rule CRUD and alert acknowledgements.

use rusqlite::{params, Connection};

use vigil_core::errors::VigilResult;
use vigil_core::models::AuditRecord;

use crate::{enum_to_str, to_storage_err};

/// Writes audit rows. Called inside the same `with_conn_sync` closure as the
/// mutation it records.
pub struct AuditLogger;

impl AuditLogger {
    pub fn log(conn: &Connection, record: &AuditRecord) -> VigilResult<()> {
        conn.execute(
            "INSERT INTO audit_log (entity_kind, entity_id, operation, actor, old_value, new_value, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.entity_kind,
                record.entity_id,
                enum_to_str(&record.operation),
                record.actor.to_string(),
                record.old_value.as_ref().map(|v| v.to_string()),
                record.new_value.as_ref().map(|v| v.to_string()),
                record.timestamp.to_rfc3339(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(())
    }

    /// Number of audit rows for an entity (diagnostics and tests).
    pub fn count_for(conn: &Connection, entity_id: &str) -> VigilResult<u64> {
        conn.query_row(
            "SELECT COUNT(*) FROM audit_log WHERE entity_id = ?1",
            params![entity_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))
    }
}
