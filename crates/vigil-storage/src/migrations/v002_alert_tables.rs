//! v002: alert_rules, alerts, anomalies, incidents.

use rusqlite::Connection;

use vigil_core::errors::VigilResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VigilResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS alert_rules (
            id                TEXT PRIMARY KEY,
            name              TEXT NOT NULL,
            metric            TEXT NOT NULL,
            condition         TEXT NOT NULL,
            threshold         REAL NOT NULL,
            sustained_minutes INTEGER NOT NULL DEFAULT 0,
            severity          TEXT NOT NULL,
            enabled           INTEGER NOT NULL DEFAULT 1,
            created_at        TEXT NOT NULL,
            updated_at        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS alerts (
            id              TEXT PRIMARY KEY,
            timestamp       TEXT NOT NULL,
            service_id      TEXT NOT NULL,
            severity        TEXT NOT NULL,
            rule_id         TEXT NOT NULL,
            message         TEXT NOT NULL,
            status          TEXT NOT NULL CHECK (status IN ('new', 'acknowledged', 'resolved')),
            acknowledged_at TEXT,
            resolved_at     TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_alerts_service_rule ON alerts(service_id, rule_id);
        CREATE INDEX IF NOT EXISTS idx_alerts_status ON alerts(status);
        CREATE INDEX IF NOT EXISTS idx_alerts_timestamp ON alerts(timestamp);

        CREATE TABLE IF NOT EXISTS anomalies (
            id          TEXT PRIMARY KEY,
            timestamp   TEXT NOT NULL,
            service_id  TEXT NOT NULL,
            metric      TEXT NOT NULL,
            observed    REAL NOT NULL,
            expected    REAL NOT NULL,
            deviation   REAL NOT NULL,
            kind        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_anomalies_service ON anomalies(service_id);
        CREATE INDEX IF NOT EXISTS idx_anomalies_timestamp ON anomalies(timestamp);

        CREATE TABLE IF NOT EXISTS incidents (
            id                 TEXT PRIMARY KEY,
            title              TEXT NOT NULL,
            status             TEXT NOT NULL CHECK (status IN ('active', 'investigating', 'resolved')),
            severity           TEXT NOT NULL,
            started_at         TEXT NOT NULL,
            resolved_at        TEXT,
            alert_ids          TEXT NOT NULL DEFAULT '[]',
            affected_services  TEXT NOT NULL DEFAULT '[]',
            timeline           TEXT NOT NULL DEFAULT '[]',
            summary            TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_incidents_status ON incidents(status);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
