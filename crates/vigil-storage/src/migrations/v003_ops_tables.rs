//! v003: sla_records, audit_log, cycle_errors.

use rusqlite::Connection;

use vigil_core::errors::VigilResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VigilResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sla_records (
            service_id        TEXT NOT NULL,
            period            TEXT NOT NULL,
            window_start      TEXT NOT NULL,
            window_end        TEXT NOT NULL,
            total_probes      INTEGER NOT NULL,
            successful_probes INTEGER NOT NULL,
            uptime_percent    REAL NOT NULL,
            avg_latency_ms    REAL NOT NULL,
            p95_latency_ms    INTEGER NOT NULL,
            p99_latency_ms    INTEGER NOT NULL,
            max_latency_ms    INTEGER NOT NULL,
            outage_minutes    INTEGER NOT NULL,
            PRIMARY KEY (service_id, period, window_start)
        );

        CREATE TABLE IF NOT EXISTS audit_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            entity_kind TEXT NOT NULL,
            entity_id   TEXT NOT NULL,
            operation   TEXT NOT NULL,
            actor       TEXT NOT NULL DEFAULT 'system',
            old_value   TEXT,
            new_value   TEXT,
            timestamp   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_audit_entity ON audit_log(entity_kind, entity_id);
        CREATE INDEX IF NOT EXISTS idx_audit_timestamp ON audit_log(timestamp);

        CREATE TABLE IF NOT EXISTS cycle_errors (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            context   TEXT NOT NULL,
            message   TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
