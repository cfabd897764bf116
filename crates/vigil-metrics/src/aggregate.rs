//! Windowed statistics per metric: mean/min/max/stddev over 1h/24h/7d/30d.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use vigil_core::constants::WINDOW_MINUTES;
use vigil_core::models::MetricSample;

/// Aggregate for one metric over one window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowStats {
    pub window_minutes: i64,
    pub metric: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub stddev: f64,
    pub sample_count: usize,
}

/// Compute stats for every (window, metric) pair that has samples.
/// Windows with no samples are skipped entirely.
pub fn aggregate_windows(samples: &[MetricSample], now: DateTime<Utc>) -> Vec<WindowStats> {
    let mut out = Vec::new();
    for window_minutes in WINDOW_MINUTES {
        let cutoff = now - Duration::minutes(window_minutes);
        let in_window: Vec<&MetricSample> =
            samples.iter().filter(|s| s.timestamp >= cutoff).collect();
        if in_window.is_empty() {
            continue;
        }
        for metric in MetricSample::METRICS {
            let values: Vec<f64> = in_window.iter().filter_map(|s| s.value(metric)).collect();
            if values.is_empty() {
                continue;
            }
            out.push(WindowStats {
                window_minutes,
                metric: metric.to_string(),
                mean: mean(&values),
                min: values.iter().copied().fold(f64::INFINITY, f64::min),
                max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                stddev: stddev(&values),
                sample_count: values.len(),
            });
        }
    }
    out
}

/// Arithmetic mean. Zero for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation. Zero for fewer than two values.
pub(crate) fn stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
