//! Incident rows: JSON-typed alert/service arrays and timeline.

use rusqlite::{params, Connection, Row};

use vigil_core::errors::VigilResult;
use vigil_core::models::Incident;

use super::alert_ops::parse_ts;
use crate::{enum_from_str, enum_to_str, to_storage_err};

pub fn upsert_incident(conn: &Connection, incident: &Incident) -> VigilResult<()> {
    let alert_ids = serde_json::to_string(&incident.alert_ids)?;
    let affected = serde_json::to_string(&incident.affected_services)?;
    let timeline = serde_json::to_string(&incident.timeline)?;

    conn.execute(
        "INSERT INTO incidents (
            id, title, status, severity, started_at, resolved_at,
            alert_ids, affected_services, timeline, summary
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        ON CONFLICT(id) DO UPDATE SET
            status = excluded.status,
            severity = excluded.severity,
            resolved_at = excluded.resolved_at,
            alert_ids = excluded.alert_ids,
            affected_services = excluded.affected_services,
            timeline = excluded.timeline,
            summary = excluded.summary",
        params![
            incident.id,
            incident.title,
            enum_to_str(&incident.status),
            enum_to_str(&incident.severity),
            incident.started_at.to_rfc3339(),
            incident.resolved_at.map(|t| t.to_rfc3339()),
            alert_ids,
            affected,
            timeline,
            incident.summary,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Most recent incidents in chronological order.
pub fn load_incidents(conn: &Connection, limit: usize) -> VigilResult<Vec<Incident>> {
    let mut stmt = conn
        .prepare("SELECT id, title, status, severity, started_at, resolved_at, alert_ids, affected_services, timeline, summary FROM incidents ORDER BY started_at DESC LIMIT ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit], row_to_incident)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut incidents = Vec::new();
    for row in rows {
        incidents.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    incidents.reverse();
    Ok(incidents)
}

fn row_to_incident(row: &Row<'_>) -> rusqlite::Result<VigilResult<Incident>> {
    let status: String = row.get(2)?;
    let severity: String = row.get(3)?;
    let started_at: String = row.get(4)?;
    let resolved_at: Option<String> = row.get(5)?;
    let alert_ids: String = row.get(6)?;
    let affected: String = row.get(7)?;
    let timeline: String = row.get(8)?;

    Ok((|| {
        Ok(Incident {
            id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
            title: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
            status: enum_from_str(&status)?,
            severity: enum_from_str(&severity)?,
            started_at: parse_ts(&started_at)?,
            resolved_at: resolved_at.as_deref().map(parse_ts).transpose()?,
            alert_ids: serde_json::from_str(&alert_ids)?,
            affected_services: serde_json::from_str(&affected)?,
            timeline: serde_json::from_str(&timeline)?,
            summary: row.get(9).map_err(|e| to_storage_err(e.to_string()))?,
        })
    })())
}
