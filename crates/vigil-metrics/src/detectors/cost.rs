//! Cost spike detection: the latest day against the prior seven-day mean.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use vigil_core::constants::{COST_MIN_DATES, COST_SPIKE_RATIO};
use vigil_core::models::{Anomaly, AnomalyKind, CostEntry};

/// Flag a project whose latest daily total exceeds the mean of the prior
/// seven days by more than the spike ratio. Needs at least eight distinct
/// dates; otherwise silent.
pub fn detect_cost(
    project_id: &str,
    entries: &[CostEntry],
    now: DateTime<Utc>,
) -> Option<Anomaly> {
    // BTreeMap keeps the YYYY-MM-DD keys in calendar order.
    let mut daily: BTreeMap<&str, f64> = BTreeMap::new();
    for entry in entries {
        *daily.entry(entry.date.as_str()).or_insert(0.0) += entry.amount_usd;
    }
    if daily.len() < COST_MIN_DATES {
        return None;
    }

    let totals: Vec<f64> = daily.values().copied().collect();
    let today = *totals.last()?;
    let prior = &totals[totals.len() - 8..totals.len() - 1];
    let avg7 = prior.iter().sum::<f64>() / prior.len() as f64;
    if avg7 <= 0.0 {
        return None;
    }

    let ratio = (today - avg7) / avg7;
    if ratio <= COST_SPIKE_RATIO {
        return None;
    }

    Some(Anomaly {
        id: uuid::Uuid::new_v4().to_string(),
        timestamp: now,
        service_id: project_id.to_string(),
        metric: "cost".to_string(),
        observed: today,
        expected: avg7,
        deviation: ratio,
        kind: AnomalyKind::Cost,
    })
}
