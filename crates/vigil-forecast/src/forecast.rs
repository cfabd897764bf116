//! Daily aggregation, trend classification, and the projection horizons.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use vigil_core::models::{CostEntry, CostForecast, CostPoint, CostTrend};

use crate::regression;

/// Projection horizon in days; the first 7 make up the short horizon.
const LONG_HORIZON_DAYS: usize = 30;
const SHORT_HORIZON_DAYS: usize = 7;

/// Slope fraction of current daily cost that separates stable from moving.
const TREND_EPSILON: f64 = 0.01;

/// Build a cost forecast from raw entries: aggregate per calendar day, fit a
/// line, classify the trend, and project 30 days forward (clamped ≥ 0).
pub fn forecast_costs(entries: &[CostEntry]) -> CostForecast {
    // BTreeMap orders the YYYY-MM-DD keys chronologically.
    let mut daily: BTreeMap<String, f64> = BTreeMap::new();
    for entry in entries {
        *daily.entry(entry.date.clone()).or_insert(0.0) += entry.amount_usd;
    }

    let values: Vec<f64> = daily.values().copied().collect();
    let line = regression::fit(&values);

    let current = values.last().copied().unwrap_or(0.0);
    let trend = classify(line.slope, current);
    let confidence = (line.r_squared.max(0.0) * 100.0).round() as u8;

    let mut points: Vec<CostPoint> = daily
        .iter()
        .map(|(date, amount)| CostPoint {
            date: date.clone(),
            amount_usd: *amount,
            projected: false,
        })
        .collect();

    let last_date = daily
        .keys()
        .last()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
    let last_index = values.len().saturating_sub(1);

    let mut predicted_7d_total = 0.0;
    let mut predicted_30d_total = 0.0;
    for step in 1..=LONG_HORIZON_DAYS {
        let amount = line.predict((last_index + step) as f64);
        predicted_30d_total += amount;
        if step <= SHORT_HORIZON_DAYS {
            predicted_7d_total += amount;
        }
        let date = last_date
            .and_then(|d| d.checked_add_days(chrono::Days::new(step as u64)))
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("+{step}d"));
        points.push(CostPoint {
            date,
            amount_usd: amount,
            projected: true,
        });
    }

    CostForecast {
        points,
        slope: line.slope,
        intercept: line.intercept,
        r_squared: line.r_squared,
        trend,
        confidence,
        predicted_7d_total,
        predicted_30d_total,
    }
}

/// Increasing above +1% of current daily cost per day, decreasing below
/// −1%, stable in between.
fn classify(slope: f64, current_daily: f64) -> CostTrend {
    let epsilon = TREND_EPSILON * current_daily;
    if slope > epsilon {
        CostTrend::Increasing
    } else if slope < -epsilon {
        CostTrend::Decreasing
    } else {
        CostTrend::Stable
    }
}
