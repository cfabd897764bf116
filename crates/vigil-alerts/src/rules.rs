//! Rule semantics: what counts as a violation, and CRUD validation.

use chrono::{DateTime, Duration, Utc};

use vigil_core::constants::ANOMALY_RULE_LOOKBACK_MINUTES;
use vigil_core::errors::{VigilError, VigilResult};
use vigil_core::models::{AlertRule, Anomaly, RuleMetric, Service};

/// Whether `service` currently violates `rule`.
///
/// `status` rules violate on any non-operational state; `cpu`/`memory`
/// compare the gauge with the rule's condition; `anomaly` rules violate when
/// any anomaly for the service landed within the trailing lookback window.
pub fn is_violated(
    rule: &AlertRule,
    service: &Service,
    anomalies: &[Anomaly],
    now: DateTime<Utc>,
) -> bool {
    match rule.metric {
        RuleMetric::Status => !service.status.is_operational(),
        RuleMetric::Cpu => rule.condition.matches(service.cpu_percent, rule.threshold),
        RuleMetric::Memory => rule.condition.matches(service.memory_mb, rule.threshold),
        RuleMetric::Anomaly => {
            let cutoff = now - Duration::minutes(ANOMALY_RULE_LOOKBACK_MINUTES);
            anomalies
                .iter()
                .any(|a| a.service_id == service.id && a.timestamp >= cutoff)
        }
    }
}

/// Reject malformed rule input before any mutation happens.
pub fn validate_rule(rule: &AlertRule) -> VigilResult<()> {
    if rule.id.trim().is_empty() {
        return Err(VigilError::invalid_rule("id must not be empty"));
    }
    if rule.name.trim().is_empty() {
        return Err(VigilError::invalid_rule("name must not be empty"));
    }
    if !rule.threshold.is_finite() {
        return Err(VigilError::invalid_rule("threshold must be finite"));
    }
    if rule.threshold < 0.0 {
        return Err(VigilError::invalid_rule("threshold must not be negative"));
    }
    Ok(())
}
