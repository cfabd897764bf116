use chrono::{Duration, Utc};
use proptest::prelude::*;
use vigil_core::models::{ProbeRecord, SlaPeriod};
use vigil_sla::compute_window;

fn probes(oks: &[bool], latencies: &[u64]) -> Vec<ProbeRecord> {
    let now = Utc::now();
    oks.iter()
        .zip(latencies)
        .enumerate()
        .map(|(i, (&ok, &latency_ms))| ProbeRecord {
            service_id: "svc".to_string(),
            timestamp: now - Duration::minutes(i as i64 % 59),
            ok,
            latency_ms,
            status_code: None,
        })
        .collect()
}

proptest! {
    #[test]
    fn uptime_always_within_bounds(
        oks in prop::collection::vec(any::<bool>(), 0..200),
        latency in 0u64..10_000,
    ) {
        let latencies = vec![latency; oks.len()];
        let record = compute_window("svc", &probes(&oks, &latencies), SlaPeriod::Hour, Utc::now());
        prop_assert!((0.0..=100.0).contains(&record.uptime_percent));
        prop_assert!(!record.uptime_percent.is_nan());
        prop_assert!(record.successful_probes <= record.total_probes);
    }

    #[test]
    fn percentiles_never_exceed_max(
        latencies in prop::collection::vec(0u64..60_000, 1..100),
    ) {
        let oks = vec![true; latencies.len()];
        let record = compute_window("svc", &probes(&oks, &latencies), SlaPeriod::Hour, Utc::now());
        prop_assert!(record.p95_latency_ms <= record.max_latency_ms);
        prop_assert!(record.p99_latency_ms <= record.max_latency_ms);
        prop_assert!(record.p95_latency_ms <= record.p99_latency_ms);
        prop_assert!(record.avg_latency_ms <= record.max_latency_ms as f64);
    }
}
