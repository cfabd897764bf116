//! Trend detection: sustained steep growth over the most recent samples.

use chrono::{DateTime, Utc};

use vigil_core::constants::{TREND_RISE_COUNT, TREND_RISE_RATIO};
use vigil_core::models::{Anomaly, AnomalyKind, MetricSample};

/// Window of trailing samples the detector inspects.
const TREND_WINDOW: usize = 4;

/// Flag metrics that rose more than the qualifying ratio on three
/// consecutive steps across the last four ordered samples. Deviation is the
/// percent change from the first to the last of the window.
pub fn detect_trend(
    service_id: &str,
    samples: &[MetricSample],
    now: DateTime<Utc>,
) -> Vec<Anomaly> {
    if samples.len() < TREND_WINDOW {
        return Vec::new();
    }
    let mut window: Vec<&MetricSample> = samples.iter().collect();
    window.sort_by_key(|s| s.timestamp);
    let window = &window[window.len() - TREND_WINDOW..];

    let mut anomalies = Vec::new();
    for metric in MetricSample::METRICS {
        let values: Vec<f64> = window.iter().filter_map(|s| s.value(metric)).collect();
        if values.len() < TREND_WINDOW {
            continue;
        }

        let mut consecutive_rises = 0usize;
        for pair in values.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if prev > 0.0 && (next - prev) / prev > TREND_RISE_RATIO {
                consecutive_rises += 1;
            } else {
                consecutive_rises = 0;
            }
        }

        let first = values[0];
        let last = values[values.len() - 1];
        if consecutive_rises >= TREND_RISE_COUNT && first > 0.0 {
            anomalies.push(Anomaly {
                id: uuid::Uuid::new_v4().to_string(),
                timestamp: now,
                service_id: service_id.to_string(),
                metric: metric.to_string(),
                observed: last,
                expected: first,
                deviation: (last - first) / first * 100.0,
                kind: AnomalyKind::Trend,
            });
        }
    }
    anomalies
}
