use chrono::{DateTime, Duration, Utc};
use vigil_core::models::{ProbeRecord, SlaPeriod};
use vigil_sla::{compute_sla, compute_window};

fn probe(service: &str, at: DateTime<Utc>, ok: bool, latency_ms: u64) -> ProbeRecord {
    ProbeRecord {
        service_id: service.to_string(),
        timestamp: at,
        ok,
        latency_ms,
        status_code: Some(if ok { 200 } else { 503 }),
    }
}

#[test]
fn zero_probes_yield_all_zero_record() {
    let record = compute_window("svc", &[], SlaPeriod::Hour, Utc::now());
    assert_eq!(record.total_probes, 0);
    assert_eq!(record.successful_probes, 0);
    assert_eq!(record.uptime_percent, 0.0);
    assert!(!record.uptime_percent.is_nan());
    assert_eq!(record.outage_minutes, 0);
}

#[test]
fn all_four_periods_are_computed() {
    let now = Utc::now();
    let probes = vec![probe("svc", now - Duration::minutes(5), true, 20)];
    let records = compute_sla("svc", &probes, now);

    assert_eq!(records.len(), 4);
    let periods: Vec<SlaPeriod> = records.iter().map(|r| r.period).collect();
    assert_eq!(
        periods,
        vec![SlaPeriod::Hour, SlaPeriod::Day, SlaPeriod::Week, SlaPeriod::Month]
    );
}

#[test]
fn uptime_is_successful_over_total() {
    let now = Utc::now();
    let mut probes: Vec<ProbeRecord> = (0..8)
        .map(|i| probe("svc", now - Duration::minutes(i * 5), true, 20))
        .collect();
    probes.push(probe("svc", now - Duration::minutes(45), false, 0));
    probes.push(probe("svc", now - Duration::minutes(50), false, 0));

    let record = compute_window("svc", &probes, SlaPeriod::Hour, now);
    assert_eq!(record.total_probes, 10);
    assert_eq!(record.successful_probes, 8);
    assert!((record.uptime_percent - 80.0).abs() < 1e-9);
    // Two failed probes at the assumed 5-minute spacing.
    assert_eq!(record.outage_minutes, 10);
}

#[test]
fn old_probes_fall_out_of_short_windows() {
    let now = Utc::now();
    let probes = vec![
        probe("svc", now - Duration::minutes(30), false, 0),
        probe("svc", now - Duration::hours(3), true, 20),
    ];

    let hour = compute_window("svc", &probes, SlaPeriod::Hour, now);
    assert_eq!(hour.total_probes, 1);
    assert_eq!(hour.uptime_percent, 0.0);

    let day = compute_window("svc", &probes, SlaPeriod::Day, now);
    assert_eq!(day.total_probes, 2);
    assert!((day.uptime_percent - 50.0).abs() < 1e-9);
}

#[test]
fn probes_for_other_services_are_ignored() {
    let now = Utc::now();
    let probes = vec![
        probe("svc", now - Duration::minutes(5), true, 20),
        probe("other", now - Duration::minutes(5), false, 0),
    ];

    let record = compute_window("svc", &probes, SlaPeriod::Hour, now);
    assert_eq!(record.total_probes, 1);
    assert!((record.uptime_percent - 100.0).abs() < 1e-9);
}

#[test]
fn percentiles_use_the_ceil_index() {
    let now = Utc::now();
    // Latencies 10, 20, ..., 100: p95 → ceil(0.95·10)=10th value (100),
    // p99 → ceil(0.99·10)=10th value (100); with 20 values p95 → 19th.
    let probes: Vec<ProbeRecord> = (1..=10)
        .map(|i| probe("svc", now - Duration::minutes(i), true, (i as u64) * 10))
        .collect();
    let record = compute_window("svc", &probes, SlaPeriod::Hour, now);
    assert_eq!(record.p95_latency_ms, 100);
    assert_eq!(record.p99_latency_ms, 100);
    assert_eq!(record.max_latency_ms, 100);
    assert!((record.avg_latency_ms - 55.0).abs() < 1e-9);

    let probes: Vec<ProbeRecord> = (1..=20)
        .map(|i| probe("svc", now - Duration::minutes(i), true, (i as u64) * 10))
        .collect();
    let record = compute_window("svc", &probes, SlaPeriod::Hour, now);
    assert_eq!(record.p95_latency_ms, 190);
    assert_eq!(record.p99_latency_ms, 200);
}

#[test]
fn uptime_stays_within_bounds() {
    let now = Utc::now();
    for ok_count in 0..=20u64 {
        let probes: Vec<ProbeRecord> = (0..20)
            .map(|i| probe("svc", now - Duration::minutes(i), (i as u64) < ok_count, 10))
            .collect();
        let record = compute_window("svc", &probes, SlaPeriod::Hour, now);
        assert!(
            (0.0..=100.0).contains(&record.uptime_percent),
            "uptime out of bounds: {}",
            record.uptime_percent
        );
    }
}
