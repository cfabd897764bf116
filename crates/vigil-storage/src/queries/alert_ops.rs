//! Alert rows: lifecycle upsert and warm-start loading.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use vigil_core::errors::VigilResult;
use vigil_core::models::Alert;

use crate::{enum_from_str, enum_to_str, to_storage_err};

/// Upsert one alert, keyed by alert id. Lifecycle transitions overwrite the
/// status and timestamps in place.
pub fn upsert_alert(conn: &Connection, alert: &Alert) -> VigilResult<()> {
    conn.execute(
        "INSERT INTO alerts (
            id, timestamp, service_id, severity, rule_id, message,
            status, acknowledged_at, resolved_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT(id) DO UPDATE SET
            status = excluded.status,
            acknowledged_at = excluded.acknowledged_at,
            resolved_at = excluded.resolved_at",
        params![
            alert.id,
            alert.timestamp.to_rfc3339(),
            alert.service_id,
            enum_to_str(&alert.severity),
            alert.rule_id,
            alert.message,
            enum_to_str(&alert.status),
            alert.acknowledged_at.map(|t| t.to_rfc3339()),
            alert.resolved_at.map(|t| t.to_rfc3339()),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Most recent alerts in chronological order.
pub fn load_alerts(conn: &Connection, limit: usize) -> VigilResult<Vec<Alert>> {
    let mut stmt = conn
        .prepare("SELECT id, timestamp, service_id, severity, rule_id, message, status, acknowledged_at, resolved_at FROM alerts ORDER BY timestamp DESC LIMIT ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit], row_to_alert)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut alerts = Vec::new();
    for row in rows {
        alerts.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    alerts.reverse();
    Ok(alerts)
}

fn row_to_alert(row: &Row<'_>) -> rusqlite::Result<VigilResult<Alert>> {
    let severity: String = row.get(3)?;
    let status: String = row.get(6)?;
    let timestamp: String = row.get(1)?;
    let acknowledged_at: Option<String> = row.get(7)?;
    let resolved_at: Option<String> = row.get(8)?;

    Ok((|| {
        Ok(Alert {
            id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
            timestamp: parse_ts(&timestamp)?,
            service_id: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
            severity: enum_from_str(&severity)?,
            rule_id: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
            message: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
            status: enum_from_str(&status)?,
            acknowledged_at: acknowledged_at.as_deref().map(parse_ts).transpose()?,
            resolved_at: resolved_at.as_deref().map(parse_ts).transpose()?,
        })
    })())
}

pub(crate) fn parse_ts(s: &str) -> VigilResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {s:?}: {e}")))
}
