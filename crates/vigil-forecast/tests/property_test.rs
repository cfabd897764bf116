use proptest::prelude::*;
use vigil_core::models::CostEntry;
use vigil_forecast::{fit, forecast_costs};

proptest! {
    #[test]
    fn r_squared_is_at_most_one(values in prop::collection::vec(0.0f64..1_000.0, 0..60)) {
        let line = fit(&values);
        prop_assert!(line.r_squared <= 1.0 + 1e-9, "R² = {}", line.r_squared);
    }

    #[test]
    fn projections_are_never_negative(
        values in prop::collection::vec(0.0f64..500.0, 1..40),
    ) {
        let entries: Vec<CostEntry> = values
            .iter()
            .enumerate()
            .map(|(i, amount)| CostEntry {
                date: format!("2026-{:02}-{:02}", 1 + i / 28, 1 + i % 28),
                project_id: "proj".to_string(),
                service_id: None,
                amount_usd: *amount,
            })
            .collect();
        let forecast = forecast_costs(&entries);
        prop_assert!(forecast.points.iter().filter(|p| p.projected).all(|p| p.amount_usd >= 0.0));
        prop_assert!(forecast.predicted_7d_total >= 0.0);
        prop_assert!(forecast.predicted_30d_total >= 0.0);
        prop_assert!(forecast.confidence <= 100);
    }
}
