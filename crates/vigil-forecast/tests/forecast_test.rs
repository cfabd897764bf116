use vigil_core::models::{CostEntry, CostTrend};
use vigil_forecast::{fit, forecast_costs};

fn entry(date: &str, amount: f64) -> CostEntry {
    CostEntry {
        date: date.to_string(),
        project_id: "proj".to_string(),
        service_id: None,
        amount_usd: amount,
    }
}

// ── Regression guards ────────────────────────────────────────────────────

#[test]
fn empty_series_fits_flat_zero() {
    let line = fit(&[]);
    assert_eq!(line.slope, 0.0);
    assert_eq!(line.intercept, 0.0);
    assert_eq!(line.r_squared, 0.0);
}

#[test]
fn single_point_fits_flat_at_that_value() {
    let line = fit(&[12.5]);
    assert_eq!(line.slope, 0.0);
    assert_eq!(line.intercept, 12.5);
    assert_eq!(line.r_squared, 0.0);
}

#[test]
fn perfect_line_recovers_slope_and_unit_r_squared() {
    // y = 2x + 3
    let line = fit(&[3.0, 5.0, 7.0, 9.0, 11.0]);
    assert!((line.slope - 2.0).abs() < 1e-9);
    assert!((line.intercept - 3.0).abs() < 1e-9);
    assert!((line.r_squared - 1.0).abs() < 1e-9);
}

#[test]
fn prediction_clamps_below_zero() {
    // Steeply decreasing: projections bottom out at zero.
    let line = fit(&[30.0, 20.0, 10.0]);
    assert!(line.predict(10.0) == 0.0);
}

// ── Forecast ─────────────────────────────────────────────────────────────

#[test]
fn single_data_point_projects_flat() {
    let forecast = forecast_costs(&[entry("2026-08-01", 10.0)]);
    assert_eq!(forecast.slope, 0.0);
    assert_eq!(forecast.r_squared, 0.0);
    assert_eq!(forecast.confidence, 0);
    assert_eq!(forecast.trend, CostTrend::Stable);
    assert!((forecast.predicted_7d_total - 70.0).abs() < 1e-9);
    assert!((forecast.predicted_30d_total - 300.0).abs() < 1e-9);
    assert!(forecast
        .points
        .iter()
        .filter(|p| p.projected)
        .all(|p| (p.amount_usd - 10.0).abs() < 1e-9));
}

#[test]
fn growing_costs_classify_increasing() {
    let entries: Vec<CostEntry> = (1..=9)
        .map(|d| entry(&format!("2026-08-0{d}"), 10.0 + d as f64 * 2.0))
        .collect();
    let forecast = forecast_costs(&entries);
    assert_eq!(forecast.trend, CostTrend::Increasing);
    assert_eq!(forecast.confidence, 100);
    assert!(forecast.slope > 0.0);
}

#[test]
fn shrinking_costs_classify_decreasing_and_clamp() {
    let entries: Vec<CostEntry> = (1..=9)
        .map(|d| entry(&format!("2026-08-0{d}"), 50.0 - d as f64 * 5.0))
        .collect();
    let forecast = forecast_costs(&entries);
    assert_eq!(forecast.trend, CostTrend::Decreasing);
    assert!(forecast.points.iter().all(|p| p.amount_usd >= 0.0));
}

#[test]
fn flat_costs_classify_stable() {
    let entries: Vec<CostEntry> = (1..=9)
        .map(|d| entry(&format!("2026-08-0{d}"), 25.0))
        .collect();
    let forecast = forecast_costs(&entries);
    assert_eq!(forecast.trend, CostTrend::Stable);
    // A flat series fits itself perfectly.
    assert_eq!(forecast.confidence, 100);
}

#[test]
fn points_carry_history_then_projections_with_dates() {
    let entries = vec![entry("2026-08-01", 10.0), entry("2026-08-02", 12.0)];
    let forecast = forecast_costs(&entries);

    assert_eq!(forecast.points.len(), 2 + 30);
    assert!(!forecast.points[0].projected);
    assert!(!forecast.points[1].projected);
    assert!(forecast.points[2].projected);
    assert_eq!(forecast.points[2].date, "2026-08-03");
    assert_eq!(forecast.points.last().unwrap().date, "2026-09-01");
}

#[test]
fn entries_on_one_day_aggregate_before_fitting() {
    let entries = vec![
        entry("2026-08-01", 5.0),
        entry("2026-08-01", 5.0),
        entry("2026-08-02", 10.0),
    ];
    let forecast = forecast_costs(&entries);
    let history: Vec<f64> = forecast
        .points
        .iter()
        .filter(|p| !p.projected)
        .map(|p| p.amount_usd)
        .collect();
    assert_eq!(history, vec![10.0, 10.0]);
    assert_eq!(forecast.trend, CostTrend::Stable);
}
