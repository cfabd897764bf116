//! Append-only telemetry: metric points, probe records, anomalies, and the
//! rolling cycle-error log.

use rusqlite::{params, Connection};

use vigil_core::errors::VigilResult;
use vigil_core::models::{Anomaly, CycleError, MetricSample, ProbeRecord};

use crate::{enum_to_str, to_storage_err};

/// One row per (service, timestamp, metric name); retried cycles are
/// idempotent via INSERT OR IGNORE on the natural key.
pub fn insert_samples(conn: &Connection, samples: &[MetricSample]) -> VigilResult<()> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT OR IGNORE INTO metric_points (service_id, timestamp, metric, value, project_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    for sample in samples {
        let ts = sample.timestamp.to_rfc3339();
        for metric in MetricSample::METRICS {
            let Some(value) = sample.value(metric) else {
                continue;
            };
            stmt.execute(params![
                sample.service_id,
                ts,
                metric,
                value,
                sample.project_id,
            ])
            .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }
    Ok(())
}

pub fn insert_probes(conn: &Connection, probes: &[ProbeRecord]) -> VigilResult<()> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO probe_records (service_id, timestamp, ok, latency_ms, status_code)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    for probe in probes {
        stmt.execute(params![
            probe.service_id,
            probe.timestamp.to_rfc3339(),
            probe.ok as i32,
            probe.latency_ms,
            probe.status_code,
        ])
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

pub fn insert_anomalies(conn: &Connection, anomalies: &[Anomaly]) -> VigilResult<()> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT OR IGNORE INTO anomalies (
                id, timestamp, service_id, metric, observed, expected, deviation, kind
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    for anomaly in anomalies {
        stmt.execute(params![
            anomaly.id,
            anomaly.timestamp.to_rfc3339(),
            anomaly.service_id,
            anomaly.metric,
            anomaly.observed,
            anomaly.expected,
            anomaly.deviation,
            enum_to_str(&anomaly.kind),
        ])
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

pub fn insert_cycle_error(conn: &Connection, error: &CycleError) -> VigilResult<()> {
    conn.execute(
        "INSERT INTO cycle_errors (timestamp, context, message) VALUES (?1, ?2, ?3)",
        params![
            error.timestamp.to_rfc3339(),
            error.context,
            error.message,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
