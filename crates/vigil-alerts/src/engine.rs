//! [`AlertEngine`] — owns the rule set, the alert list, and the two
//! cross-cycle indexes (violation starts, active alerts per pair).

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use vigil_core::constants::MAX_RESOLVED_ALERTS;
use vigil_core::errors::{VigilError, VigilResult};
use vigil_core::models::{Alert, AlertRule, AlertStatus, Anomaly, Service};

use crate::rules;

/// Key for the per-pair indexes.
type PairKey = (String, String);

/// Alerts raised and resolved by one evaluation pass, for persistence and
/// change broadcasting.
#[derive(Debug, Default)]
pub struct AlertChanges {
    pub raised: Vec<Alert>,
    pub resolved: Vec<Alert>,
}

impl AlertChanges {
    pub fn is_empty(&self) -> bool {
        self.raised.is_empty() && self.resolved.is_empty()
    }
}

/// Evaluates rules each cycle and manages alert lifecycle.
///
/// State machine per (service, rule) pair: unviolated → violating(start) →
/// alert raised once the violation has been sustained long enough. The
/// violation-start index survives between cycles; everything else is
/// recomputed from current inputs.
#[derive(Debug, Default)]
pub struct AlertEngine {
    rules: Vec<AlertRule>,
    alerts: Vec<Alert>,
    /// First time each pair began failing. Removed the moment the pair clears.
    violation_start: HashMap<PairKey, DateTime<Utc>>,
    /// Non-resolved alert id per pair; enforces at most one active alert per
    /// (service, rule).
    active: HashMap<PairKey, String>,
}

impl AlertEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild engine state from persisted rules and alerts (warm start).
    pub fn restore(rules: Vec<AlertRule>, alerts: Vec<Alert>) -> Self {
        let mut active = HashMap::new();
        for alert in alerts.iter().filter(|a| a.is_active()) {
            active.insert(
                (alert.service_id.clone(), alert.rule_id.clone()),
                alert.id.clone(),
            );
        }
        Self {
            rules,
            alerts,
            violation_start: HashMap::new(),
            active,
        }
    }

    // ── Evaluation ───────────────────────────────────────────────────────

    /// Run every enabled rule against every service. Returns the alerts
    /// raised and auto-resolved by this pass.
    pub fn evaluate(
        &mut self,
        services: &[Service],
        anomalies: &[Anomaly],
        now: DateTime<Utc>,
    ) -> AlertChanges {
        let mut changes = AlertChanges::default();

        for rule in self.rules.iter().filter(|r| r.enabled) {
            for service in services {
                let key = (service.id.clone(), rule.id.clone());
                if rules::is_violated(rule, service, anomalies, now) {
                    let start = *self.violation_start.entry(key.clone()).or_insert(now);
                    let sustained =
                        (now - start).num_minutes() >= i64::from(rule.sustained_minutes);
                    if sustained && !self.active.contains_key(&key) {
                        let alert = Alert {
                            id: uuid::Uuid::new_v4().to_string(),
                            timestamp: now,
                            service_id: service.id.clone(),
                            severity: rule.severity,
                            rule_id: rule.id.clone(),
                            message: format!(
                                "{} violated {} on {}",
                                service.name, rule.name, service.id
                            ),
                            status: AlertStatus::New,
                            acknowledged_at: None,
                            resolved_at: None,
                        };
                        tracing::info!(
                            alert_id = %alert.id,
                            service_id = %service.id,
                            rule_id = %rule.id,
                            severity = %rule.severity,
                            "alert raised"
                        );
                        self.active.insert(key, alert.id.clone());
                        self.alerts.push(alert.clone());
                        changes.raised.push(alert);
                    }
                } else {
                    self.violation_start.remove(&key);
                    if let Some(alert_id) = self.active.remove(&key) {
                        if let Some(alert) = resolve_in(&mut self.alerts, &alert_id, now) {
                            tracing::info!(
                                alert_id = %alert.id,
                                service_id = %service.id,
                                "alert auto-resolved, condition cleared"
                            );
                            changes.resolved.push(alert);
                        }
                    }
                }
            }
        }

        self.trim_resolved();
        changes
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Acknowledge a new alert. Idempotent for already-acknowledged alerts;
    /// resolved alerts cannot be acknowledged.
    pub fn acknowledge(&mut self, alert_id: &str, now: DateTime<Utc>) -> VigilResult<Alert> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == alert_id)
            .ok_or_else(|| VigilError::NotFound {
                entity: "alert",
                id: alert_id.to_string(),
            })?;
        match alert.status {
            AlertStatus::New => {
                alert.status = AlertStatus::Acknowledged;
                alert.acknowledged_at = Some(now);
                Ok(alert.clone())
            }
            AlertStatus::Acknowledged => Ok(alert.clone()),
            AlertStatus::Resolved => Err(VigilError::NotFound {
                entity: "active alert",
                id: alert_id.to_string(),
            }),
        }
    }

    // ── Rule CRUD ────────────────────────────────────────────────────────

    /// Create or replace a rule. Returns the previous version when updating.
    pub fn upsert_rule(&mut self, mut rule: AlertRule) -> VigilResult<Option<AlertRule>> {
        rules::validate_rule(&rule)?;
        match self.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => {
                rule.created_at = existing.created_at;
                let old = std::mem::replace(existing, rule);
                Ok(Some(old))
            }
            None => {
                self.rules.push(rule);
                Ok(None)
            }
        }
    }

    /// Delete a rule. Active alerts it raised are resolved in the same step
    /// so nothing lingers with no rule left to clear it; the resolved alerts
    /// come back alongside the rule for persistence.
    pub fn delete_rule(
        &mut self,
        rule_id: &str,
        now: DateTime<Utc>,
    ) -> VigilResult<(AlertRule, Vec<Alert>)> {
        let idx = self
            .rules
            .iter()
            .position(|r| r.id == rule_id)
            .ok_or_else(|| VigilError::NotFound {
                entity: "rule",
                id: rule_id.to_string(),
            })?;
        self.violation_start.retain(|(_, rid), _| rid != rule_id);

        let orphaned: Vec<String> = self
            .active
            .iter()
            .filter(|((_, rid), _)| rid == rule_id)
            .map(|(_, alert_id)| alert_id.clone())
            .collect();
        let mut resolved = Vec::new();
        for alert_id in orphaned {
            self.active.retain(|_, id| id != &alert_id);
            if let Some(alert) = resolve_in(&mut self.alerts, &alert_id, now) {
                resolved.push(alert);
            }
        }

        Ok((self.rules.remove(idx), resolved))
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn rules(&self) -> &[AlertRule] {
        &self.rules
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Non-resolved alerts only.
    pub fn active_alerts(&self) -> Vec<&Alert> {
        self.alerts.iter().filter(|a| a.is_active()).collect()
    }

    pub fn get_alert(&self, alert_id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == alert_id)
    }

    /// Drop the oldest resolved alerts beyond the retention cap. Active
    /// alerts are never trimmed.
    fn trim_resolved(&mut self) {
        let resolved = self
            .alerts
            .iter()
            .filter(|a| !a.is_active())
            .count();
        if resolved <= MAX_RESOLVED_ALERTS {
            return;
        }
        let mut to_drop = resolved - MAX_RESOLVED_ALERTS;
        self.alerts.retain(|a| {
            if to_drop > 0 && !a.is_active() {
                to_drop -= 1;
                false
            } else {
                true
            }
        });
    }
}

/// Mark one alert resolved in place, upholding `resolved_at ⇔ resolved`.
fn resolve_in(alerts: &mut [Alert], alert_id: &str, now: DateTime<Utc>) -> Option<Alert> {
    let alert = alerts
        .iter_mut()
        .find(|a| a.id == alert_id && a.is_active())?;
    alert.status = AlertStatus::Resolved;
    alert.resolved_at = Some(now);
    Some(alert.clone())
}
