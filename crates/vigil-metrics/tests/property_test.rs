use chrono::{Duration, Utc};
use proptest::prelude::*;
use vigil_core::models::MetricSample;
use vigil_metrics::detect_statistical;

fn samples(cpus: &[f64]) -> Vec<MetricSample> {
    let now = Utc::now();
    cpus.iter()
        .enumerate()
        .map(|(i, &cpu)| MetricSample {
            timestamp: now - Duration::minutes((cpus.len() - i) as i64),
            service_id: "svc".to_string(),
            project_id: "proj".to_string(),
            cpu_percent: cpu,
            memory_mb: 100.0,
            network_rx_kb: 0.0,
            network_tx_kb: 0.0,
        })
        .collect()
}

proptest! {
    #[test]
    fn silent_below_the_sample_floor(cpus in prop::collection::vec(0.0f64..100.0, 0..10)) {
        // Nine or fewer samples: never an anomaly, whatever the variance.
        let anomalies = detect_statistical("svc", &samples(&cpus), Utc::now());
        prop_assert!(anomalies.is_empty());
    }

    #[test]
    fn flagged_deviation_is_beyond_threshold(
        cpus in prop::collection::vec(0.0f64..100.0, 10..80),
    ) {
        for anomaly in detect_statistical("svc", &samples(&cpus), Utc::now()) {
            prop_assert!(anomaly.deviation.abs() > 2.0);
            prop_assert_eq!(&anomaly.service_id, "svc");
        }
    }
}
