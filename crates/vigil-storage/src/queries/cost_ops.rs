//! Daily cost rows and SLA snapshots, both upserted on natural keys.

use rusqlite::{params, Connection};

use vigil_core::errors::VigilResult;
use vigil_core::models::{CostEntry, SlaRecord};

use crate::{enum_to_str, to_storage_err};

/// Keyed by (date, project, service); a missing service id is stored as the
/// empty string so the natural key stays unique.
pub fn upsert_cost_entry(conn: &Connection, entry: &CostEntry) -> VigilResult<()> {
    conn.execute(
        "INSERT INTO cost_entries (date, project_id, service_id, amount_usd)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(date, project_id, service_id) DO UPDATE SET
             amount_usd = excluded.amount_usd",
        params![
            entry.date,
            entry.project_id,
            entry.service_id.clone().unwrap_or_default(),
            entry.amount_usd,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Keyed by (service, period, window_start); each cycle refreshes the
/// aggregate in place.
pub fn upsert_sla_record(conn: &Connection, record: &SlaRecord) -> VigilResult<()> {
    conn.execute(
        "INSERT INTO sla_records (
            service_id, period, window_start, window_end, total_probes,
            successful_probes, uptime_percent, avg_latency_ms,
            p95_latency_ms, p99_latency_ms, max_latency_ms, outage_minutes
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        ON CONFLICT(service_id, period, window_start) DO UPDATE SET
            window_end = excluded.window_end,
            total_probes = excluded.total_probes,
            successful_probes = excluded.successful_probes,
            uptime_percent = excluded.uptime_percent,
            avg_latency_ms = excluded.avg_latency_ms,
            p95_latency_ms = excluded.p95_latency_ms,
            p99_latency_ms = excluded.p99_latency_ms,
            max_latency_ms = excluded.max_latency_ms,
            outage_minutes = excluded.outage_minutes",
        params![
            record.service_id,
            enum_to_str(&record.period),
            record.window_start.to_rfc3339(),
            record.window_end.to_rfc3339(),
            record.total_probes,
            record.successful_probes,
            record.uptime_percent,
            record.avg_latency_ms,
            record.p95_latency_ms,
            record.p99_latency_ms,
            record.max_latency_ms,
            record.outage_minutes,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
