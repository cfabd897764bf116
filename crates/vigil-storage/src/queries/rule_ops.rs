//! Alert rule CRUD rows.

use rusqlite::{params, Connection, Row};

use vigil_core::errors::VigilResult;
use vigil_core::models::AlertRule;

use super::alert_ops::parse_ts;
use crate::{enum_from_str, enum_to_str, to_storage_err};

/// Upsert keyed by rule id so a retried cycle or a repeated CRUD call is
/// idempotent.
pub fn upsert_rule(conn: &Connection, rule: &AlertRule) -> VigilResult<()> {
    conn.execute(
        "INSERT INTO alert_rules (
            id, name, metric, condition, threshold, sustained_minutes,
            severity, enabled, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            metric = excluded.metric,
            condition = excluded.condition,
            threshold = excluded.threshold,
            sustained_minutes = excluded.sustained_minutes,
            severity = excluded.severity,
            enabled = excluded.enabled,
            updated_at = excluded.updated_at",
        params![
            rule.id,
            rule.name,
            enum_to_str(&rule.metric),
            enum_to_str(&rule.condition),
            rule.threshold,
            rule.sustained_minutes,
            enum_to_str(&rule.severity),
            rule.enabled as i32,
            rule.created_at.to_rfc3339(),
            rule.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn delete_rule(conn: &Connection, rule_id: &str) -> VigilResult<()> {
    conn.execute("DELETE FROM alert_rules WHERE id = ?1", params![rule_id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn load_rules(conn: &Connection) -> VigilResult<Vec<AlertRule>> {
    let mut stmt = conn
        .prepare("SELECT id, name, metric, condition, threshold, sustained_minutes, severity, enabled, created_at, updated_at FROM alert_rules ORDER BY created_at")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], row_to_rule)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rules = Vec::new();
    for row in rows {
        rules.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(rules)
}

fn row_to_rule(row: &Row<'_>) -> rusqlite::Result<VigilResult<AlertRule>> {
    let metric: String = row.get(2)?;
    let condition: String = row.get(3)?;
    let severity: String = row.get(6)?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok((|| {
        Ok(AlertRule {
            id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
            name: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
            metric: enum_from_str(&metric)?,
            condition: enum_from_str(&condition)?,
            threshold: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
            sustained_minutes: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
            severity: enum_from_str(&severity)?,
            enabled: row
                .get::<_, i32>(7)
                .map_err(|e| to_storage_err(e.to_string()))?
                != 0,
            created_at: parse_ts(&created_at)?,
            updated_at: parse_ts(&updated_at)?,
        })
    })())
}
