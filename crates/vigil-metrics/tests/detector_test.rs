use chrono::{DateTime, Duration, Utc};
use vigil_core::models::{AnomalyKind, CostEntry, MetricSample};
use vigil_metrics::{detect_cost, detect_statistical, detect_trend};

fn sample(service: &str, at: DateTime<Utc>, cpu: f64, memory: f64) -> MetricSample {
    MetricSample {
        timestamp: at,
        service_id: service.to_string(),
        project_id: "proj".to_string(),
        cpu_percent: cpu,
        memory_mb: memory,
        network_rx_kb: 0.0,
        network_tx_kb: 0.0,
    }
}

fn cost_entry(date: &str, amount: f64) -> CostEntry {
    CostEntry {
        date: date.to_string(),
        project_id: "proj".to_string(),
        service_id: None,
        amount_usd: amount,
    }
}

// ── Statistical ──────────────────────────────────────────────────────────

#[test]
fn statistical_silent_below_min_samples() {
    let now = Utc::now();
    // 9 wildly varying samples: still below the 10-sample floor.
    let samples: Vec<MetricSample> = (0..9)
        .map(|i| {
            sample(
                "svc",
                now - Duration::minutes(9 - i),
                if i % 2 == 0 { 5.0 } else { 95.0 },
                100.0,
            )
        })
        .collect();

    assert!(detect_statistical("svc", &samples, now).is_empty());
}

#[test]
fn statistical_flags_outlier_with_zscore_deviation() {
    let now = Utc::now();
    // 11 steady samples, then a spike well past 2 standard deviations.
    let mut samples: Vec<MetricSample> = (0..11)
        .map(|i| {
            let jitter = if i % 2 == 0 { 1.0 } else { -1.0 };
            sample("svc", now - Duration::minutes(12 - i), 50.0 + jitter, 100.0)
        })
        .collect();
    samples.push(sample("svc", now - Duration::minutes(1), 95.0, 100.0));

    let anomalies = detect_statistical("svc", &samples, now);
    let cpu = anomalies
        .iter()
        .find(|a| a.metric == "cpu")
        .expect("cpu anomaly");
    assert_eq!(cpu.kind, AnomalyKind::Statistical);
    assert!(cpu.deviation > 2.0, "z-score {} not above 2", cpu.deviation);
    assert_eq!(cpu.observed, 95.0);
}

#[test]
fn statistical_ignores_flat_series() {
    let now = Utc::now();
    let samples: Vec<MetricSample> = (0..15)
        .map(|i| sample("svc", now - Duration::minutes(15 - i), 50.0, 100.0))
        .collect();

    assert!(detect_statistical("svc", &samples, now).is_empty());
}

#[test]
fn statistical_ignores_samples_outside_24h() {
    let now = Utc::now();
    // Plenty of samples, but all older than the window.
    let samples: Vec<MetricSample> = (0..20)
        .map(|i| sample("svc", now - Duration::hours(25 + i), 50.0, 100.0))
        .collect();

    assert!(detect_statistical("svc", &samples, now).is_empty());
}

// ── Trend ────────────────────────────────────────────────────────────────

#[test]
fn trend_flags_three_consecutive_steep_rises() {
    let now = Utc::now();
    let samples = vec![
        sample("svc", now - Duration::minutes(4), 10.0, 100.0),
        sample("svc", now - Duration::minutes(3), 13.0, 100.0),
        sample("svc", now - Duration::minutes(2), 17.0, 100.0),
        sample("svc", now - Duration::minutes(1), 22.0, 100.0),
    ];

    let anomalies = detect_trend("svc", &samples, now);
    let cpu = anomalies
        .iter()
        .find(|a| a.metric == "cpu")
        .expect("cpu trend anomaly");
    assert_eq!(cpu.kind, AnomalyKind::Trend);
    // (22 - 10) / 10 × 100
    assert!((cpu.deviation - 120.0).abs() < 1e-9);
}

#[test]
fn trend_silent_when_one_step_is_shallow() {
    let now = Utc::now();
    // Middle step rises only 10% — breaks the consecutive run.
    let samples = vec![
        sample("svc", now - Duration::minutes(4), 10.0, 100.0),
        sample("svc", now - Duration::minutes(3), 13.0, 100.0),
        sample("svc", now - Duration::minutes(2), 14.3, 100.0),
        sample("svc", now - Duration::minutes(1), 22.0, 100.0),
    ];

    assert!(detect_trend("svc", &samples, now)
        .iter()
        .all(|a| a.metric != "cpu"));
}

#[test]
fn trend_silent_below_four_samples() {
    let now = Utc::now();
    let samples = vec![
        sample("svc", now - Duration::minutes(3), 10.0, 100.0),
        sample("svc", now - Duration::minutes(2), 15.0, 100.0),
        sample("svc", now - Duration::minutes(1), 22.0, 100.0),
    ];

    assert!(detect_trend("svc", &samples, now).is_empty());
}

// ── Cost ─────────────────────────────────────────────────────────────────

#[test]
fn cost_spike_fires_on_eighth_day() {
    let now = Utc::now();
    let mut entries: Vec<CostEntry> = (1..=7)
        .map(|d| cost_entry(&format!("2026-08-0{d}"), 10.0))
        .collect();
    entries.push(cost_entry("2026-08-08", 15.0));

    let anomaly = detect_cost("proj", &entries, now).expect("cost anomaly");
    assert_eq!(anomaly.kind, AnomalyKind::Cost);
    assert_eq!(anomaly.observed, 15.0);
    assert_eq!(anomaly.expected, 10.0);
    // (15 − 10) / 10 = 50% spike
    assert!((anomaly.deviation - 0.5).abs() < 1e-9);
}

#[test]
fn cost_silent_below_eight_dates() {
    let now = Utc::now();
    let mut entries: Vec<CostEntry> = (1..=6)
        .map(|d| cost_entry(&format!("2026-08-0{d}"), 10.0))
        .collect();
    entries.push(cost_entry("2026-08-07", 100.0));

    assert!(detect_cost("proj", &entries, now).is_none());
}

#[test]
fn cost_silent_below_spike_ratio() {
    let now = Utc::now();
    let mut entries: Vec<CostEntry> = (1..=7)
        .map(|d| cost_entry(&format!("2026-08-0{d}"), 10.0))
        .collect();
    // 14% over the prior mean: under the 15% bar.
    entries.push(cost_entry("2026-08-08", 11.4));

    assert!(detect_cost("proj", &entries, now).is_none());
}

#[test]
fn cost_sums_entries_sharing_a_date() {
    let now = Utc::now();
    let mut entries: Vec<CostEntry> = (1..=7)
        .map(|d| cost_entry(&format!("2026-08-0{d}"), 10.0))
        .collect();
    // Two services on the same day adding up to a spike.
    entries.push(cost_entry("2026-08-08", 8.0));
    entries.push(cost_entry("2026-08-08", 7.0));

    let anomaly = detect_cost("proj", &entries, now).expect("cost anomaly");
    assert_eq!(anomaly.observed, 15.0);
}
