//! Window filtering, uptime math, and the sorted-index percentile.

use chrono::{DateTime, Duration, Utc};

use vigil_core::constants::OUTAGE_MINUTES_PER_FAILED_PROBE;
use vigil_core::models::{ProbeRecord, SlaPeriod, SlaRecord};

/// One record per fixed window. Windows with zero probes yield an all-zero
/// record rather than an error.
pub fn compute_sla(
    service_id: &str,
    probes: &[ProbeRecord],
    now: DateTime<Utc>,
) -> Vec<SlaRecord> {
    SlaPeriod::ALL
        .iter()
        .map(|&period| compute_window(service_id, probes, period, now))
        .collect()
}

/// Aggregate one window of probe history.
pub fn compute_window(
    service_id: &str,
    probes: &[ProbeRecord],
    period: SlaPeriod,
    now: DateTime<Utc>,
) -> SlaRecord {
    let window_start = now - Duration::minutes(period.minutes());
    let in_window: Vec<&ProbeRecord> = probes
        .iter()
        .filter(|p| p.service_id == service_id && p.timestamp >= window_start && p.timestamp <= now)
        .collect();

    let total = in_window.len() as u64;
    if total == 0 {
        return SlaRecord {
            service_id: service_id.to_string(),
            period,
            window_start,
            window_end: now,
            total_probes: 0,
            successful_probes: 0,
            uptime_percent: 0.0,
            avg_latency_ms: 0.0,
            p95_latency_ms: 0,
            p99_latency_ms: 0,
            max_latency_ms: 0,
            outage_minutes: 0,
        };
    }

    let successful = in_window.iter().filter(|p| p.ok).count() as u64;
    let failed = total - successful;

    let mut latencies: Vec<u64> = in_window.iter().map(|p| p.latency_ms).collect();
    latencies.sort_unstable();
    let avg = latencies.iter().sum::<u64>() as f64 / latencies.len() as f64;

    SlaRecord {
        service_id: service_id.to_string(),
        period,
        window_start,
        window_end: now,
        total_probes: total,
        successful_probes: successful,
        uptime_percent: successful as f64 / total as f64 * 100.0,
        avg_latency_ms: avg,
        p95_latency_ms: percentile(&latencies, 95.0),
        p99_latency_ms: percentile(&latencies, 99.0),
        max_latency_ms: *latencies.last().unwrap_or(&0),
        outage_minutes: failed * OUTAGE_MINUTES_PER_FAILED_PROBE,
    }
}

/// Value at index `ceil(p/100 × n) − 1` of the ascending-sorted slice,
/// clamped to valid indices.
fn percentile(sorted: &[u64], p: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = (p / 100.0 * sorted.len() as f64).ceil() as usize;
    sorted[idx.saturating_sub(1).min(sorted.len() - 1)]
}
