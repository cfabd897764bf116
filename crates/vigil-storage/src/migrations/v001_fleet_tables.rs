//! v001: services, metric_points, probe_records, cost_entries.

use rusqlite::Connection;

use vigil_core::errors::VigilResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VigilResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS services (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            project_id      TEXT NOT NULL,
            status          TEXT NOT NULL,
            last_deploy     TEXT,
            health_url      TEXT,
            cpu_percent     REAL NOT NULL DEFAULT 0,
            memory_mb       REAL NOT NULL DEFAULT 0,
            uptime_percent  REAL NOT NULL DEFAULT 100,
            updated_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_services_project ON services(project_id);
        CREATE INDEX IF NOT EXISTS idx_services_status ON services(status);

        CREATE TABLE IF NOT EXISTS metric_points (
            service_id  TEXT NOT NULL,
            timestamp   TEXT NOT NULL,
            metric      TEXT NOT NULL,
            value       REAL NOT NULL,
            project_id  TEXT NOT NULL,
            PRIMARY KEY (service_id, timestamp, metric)
        );

        CREATE TABLE IF NOT EXISTS probe_records (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            service_id  TEXT NOT NULL,
            timestamp   TEXT NOT NULL,
            ok          INTEGER NOT NULL,
            latency_ms  INTEGER NOT NULL,
            status_code INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_probes_service_time ON probe_records(service_id, timestamp);

        CREATE TABLE IF NOT EXISTS cost_entries (
            date        TEXT NOT NULL,
            project_id  TEXT NOT NULL,
            service_id  TEXT NOT NULL DEFAULT '',
            amount_usd  REAL NOT NULL,
            PRIMARY KEY (date, project_id, service_id)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
