/// Vigil system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default poll interval between cycles (seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

/// Aggregation / SLA window lengths in minutes: 1h, 24h, 7d, 30d.
pub const WINDOW_MINUTES: [i64; 4] = [60, 1_440, 10_080, 43_200];

/// Consecutive external-call failures before the circuit breaker opens.
pub const BREAKER_FAILURE_THRESHOLD: u32 = 25;

/// How long the breaker stays open before a half-open attempt (seconds).
pub const BREAKER_RESET_SECS: i64 = 60;

/// Maximum attempts per external call.
pub const FETCH_MAX_ATTEMPTS: u32 = 3;

/// Linear backoff unit between retry attempts (seconds).
pub const FETCH_BACKOFF_UNIT_SECS: u64 = 1;

/// Health probe timeout (seconds).
pub const PROBE_TIMEOUT_SECS: u64 = 8;

/// Z-score above which a sample is a statistical anomaly.
pub const ZSCORE_THRESHOLD: f64 = 2.0;

/// Minimum samples in the trailing 24h before the statistical detector runs.
pub const ZSCORE_MIN_SAMPLES: usize = 10;

/// Pairwise growth ratio that counts as a rise for the trend detector.
pub const TREND_RISE_RATIO: f64 = 0.2;

/// Consecutive qualifying rises (over the last 4 samples) that flag a trend.
pub const TREND_RISE_COUNT: usize = 3;

/// Daily cost growth over the prior-7-day mean that flags a cost anomaly.
pub const COST_SPIKE_RATIO: f64 = 0.15;

/// Distinct dates required before the cost detector runs.
pub const COST_MIN_DATES: usize = 8;

/// Window for joining an alert to an incident by temporal proximity (minutes).
pub const INCIDENT_TEMPORAL_WINDOW_MINUTES: i64 = 5;

/// Lookback for the `anomaly` rule metric (minutes).
pub const ANOMALY_RULE_LOOKBACK_MINUTES: i64 = 5;

/// Assumed spacing between health probes when estimating outage minutes.
pub const OUTAGE_MINUTES_PER_FAILED_PROBE: u64 = 5;

/// Per-service metric sample history cap (oldest trimmed first).
pub const MAX_SAMPLES_PER_SERVICE: usize = 1_000;

/// Per-service health probe history cap.
pub const MAX_PROBES_PER_SERVICE: usize = 2_000;

/// Retained anomaly cap across all services.
pub const MAX_ANOMALIES: usize = 500;

/// Retained resolved-alert cap (non-resolved alerts are never trimmed).
pub const MAX_RESOLVED_ALERTS: usize = 1_000;

/// Rolling cycle-error log cap.
pub const MAX_CYCLE_ERRORS: usize = 100;
