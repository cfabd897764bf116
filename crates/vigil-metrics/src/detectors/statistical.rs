//! Z-score detection: a current value far from its trailing-24h mean.

use chrono::{DateTime, Duration, Utc};

use vigil_core::constants::{ZSCORE_MIN_SAMPLES, ZSCORE_THRESHOLD};
use vigil_core::models::{Anomaly, AnomalyKind, MetricSample};

use crate::aggregate::{mean, stddev};

/// Flag metrics whose latest value deviates more than the z-score threshold
/// from the trailing-24h mean. Returns nothing when fewer than the minimum
/// sample count exists in the window, regardless of variance.
pub fn detect_statistical(
    service_id: &str,
    samples: &[MetricSample],
    now: DateTime<Utc>,
) -> Vec<Anomaly> {
    let cutoff = now - Duration::hours(24);
    let window: Vec<&MetricSample> = samples.iter().filter(|s| s.timestamp >= cutoff).collect();
    if window.len() < ZSCORE_MIN_SAMPLES {
        return Vec::new();
    }
    let Some(current) = window.last() else {
        return Vec::new();
    };

    let mut anomalies = Vec::new();
    for metric in MetricSample::METRICS {
        let values: Vec<f64> = window.iter().filter_map(|s| s.value(metric)).collect();
        let sd = stddev(&values);
        if sd == 0.0 {
            // A flat series can't deviate from itself.
            continue;
        }
        let m = mean(&values);
        let observed = current.value(metric).unwrap_or(0.0);
        let z = (observed - m) / sd;
        if z.abs() > ZSCORE_THRESHOLD {
            anomalies.push(Anomaly {
                id: uuid::Uuid::new_v4().to_string(),
                timestamp: now,
                service_id: service_id.to_string(),
                metric: metric.to_string(),
                observed,
                expected: m,
                deviation: z,
                kind: AnomalyKind::Statistical,
            });
        }
    }
    anomalies
}
