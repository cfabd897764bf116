//! The dashboard/CLI query surface. Reads take the state read lock;
//! explicit actions (acknowledge, rule CRUD) mutate synchronously, persist,
//! audit, and broadcast.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use vigil_core::errors::{VigilError, VigilResult};
use vigil_core::models::{
    Alert, AlertRule, AlertStatus, Anomaly, AuditActor, AuditOperation, AuditRecord, CostEntry,
    CostForecast, CycleError, Deployment, Incident, IncidentStatus, MetricSample, Service,
    Severity, SlaRecord,
};
use vigil_core::traits::ServiceCatalog;

use crate::engine::MonitorEngine;
use crate::events::MonitorEvent;

/// How many recent deployments a service detail view shows.
const DEPLOYMENT_LIMIT: usize = 10;

/// Filters for the alert listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertFilter {
    pub service_id: Option<String>,
    pub status: Option<AlertStatus>,
    pub severity: Option<Severity>,
}

/// Filters for the incident listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncidentFilter {
    pub status: Option<IncidentStatus>,
    pub service_id: Option<String>,
}

/// Top-level dashboard snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct InfrastructureSnapshot {
    pub services: Vec<Service>,
    pub last_poll: Option<chrono::DateTime<Utc>>,
    pub last_success: Option<chrono::DateTime<Utc>>,
    /// False when the process degraded to memory-only persistence.
    pub durable: bool,
    pub open_incidents: usize,
    pub active_alerts: usize,
}

/// Detail view for one service.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDetail {
    pub service: Service,
    pub recent_samples: Vec<MetricSample>,
    pub sla: Vec<SlaRecord>,
    pub deployments: Vec<Deployment>,
}

impl<C: ServiceCatalog> MonitorEngine<C> {
    // ── Reads ────────────────────────────────────────────────────────────

    pub fn infrastructure(&self) -> InfrastructureSnapshot {
        let state = self.read_state();
        InfrastructureSnapshot {
            services: state.services.values().cloned().collect(),
            last_poll: state.last_poll,
            last_success: state.last_success,
            durable: self.is_durable(),
            open_incidents: state.incident_engine.open_incidents().len(),
            active_alerts: state.alert_engine.active_alerts().len(),
        }
    }

    pub fn alerts(&self, filter: &AlertFilter) -> Vec<Alert> {
        let state = self.read_state();
        state
            .alert_engine
            .alerts()
            .iter()
            .filter(|a| {
                filter
                    .service_id
                    .as_ref()
                    .map_or(true, |s| &a.service_id == s)
                    && filter.status.map_or(true, |s| a.status == s)
                    && filter.severity.map_or(true, |s| a.severity == s)
            })
            .cloned()
            .collect()
    }

    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.read_state().anomalies.clone()
    }

    pub fn cost(&self) -> Vec<CostEntry> {
        self.read_state().all_costs()
    }

    pub fn cost_forecast(&self) -> Vec<(String, CostForecast)> {
        let state = self.read_state();
        state
            .forecasts
            .iter()
            .map(|(project, forecast)| (project.clone(), forecast.clone()))
            .collect()
    }

    pub fn incidents(&self, filter: &IncidentFilter) -> Vec<Incident> {
        let state = self.read_state();
        state
            .incident_engine
            .incidents()
            .iter()
            .filter(|i| {
                filter.status.map_or(true, |s| i.status == s)
                    && filter
                        .service_id
                        .as_ref()
                        .map_or(true, |s| i.affected_services.contains(s))
            })
            .cloned()
            .collect()
    }

    pub fn service_sla(&self, service_id: &str) -> VigilResult<Vec<SlaRecord>> {
        let state = self.read_state();
        state
            .sla
            .get(service_id)
            .cloned()
            .ok_or_else(|| VigilError::NotFound {
                entity: "service",
                id: service_id.to_string(),
            })
    }

    /// Rolling diagnostics log, oldest first.
    pub fn recent_errors(&self) -> Vec<CycleError> {
        self.read_state().errors.iter().cloned().collect()
    }

    pub fn rules(&self) -> Vec<AlertRule> {
        self.read_state().alert_engine.rules().to_vec()
    }

    /// Service detail including recent deployments fetched on demand. A
    /// failing deployment fetch degrades to an empty list.
    pub async fn service_detail(&self, service_id: &str) -> VigilResult<ServiceDetail> {
        let (service, recent_samples, sla) = {
            let state = self.read_state();
            let service = state
                .services
                .get(service_id)
                .cloned()
                .ok_or_else(|| VigilError::NotFound {
                    entity: "service",
                    id: service_id.to_string(),
                })?;
            let samples = state
                .samples
                .get(service_id)
                .map(|s| s.iter().rev().take(50).rev().cloned().collect())
                .unwrap_or_default();
            let sla = state.sla.get(service_id).cloned().unwrap_or_default();
            (service, samples, sla)
        };

        let deployments = match self
            .catalog
            .fetch_deployments(service_id, DEPLOYMENT_LIMIT)
            .await
        {
            Ok(deployments) => deployments,
            Err(err) => {
                tracing::warn!(service_id, error = %err, "monitor: deployment fetch failed");
                Vec::new()
            }
        };

        Ok(ServiceDetail {
            service,
            recent_samples,
            sla,
            deployments,
        })
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Acknowledge an alert: mutate, mirror into incidents, persist, audit,
    /// broadcast.
    pub fn acknowledge_alert(&self, alert_id: &str, actor: AuditActor) -> VigilResult<Alert> {
        let now = Utc::now();
        let (alert, incident_changes) = {
            let mut guard = self.write_state();
            let state = &mut *guard;
            let alert = state.alert_engine.acknowledge(alert_id, now)?;
            let names = state.service_names();
            let all_alerts = state.alert_engine.alerts().to_vec();
            let changes = state.incident_engine.process(&all_alerts, &names, now);
            (alert, changes)
        };

        if let Err(e) = self.store.upsert_alert(&alert) {
            tracing::warn!(error = %e, "monitor: alert persist failed");
        }
        for incident in incident_changes
            .opened
            .iter()
            .chain(incident_changes.updated.iter())
            .chain(incident_changes.resolved.iter())
        {
            if let Err(e) = self.store.upsert_incident(incident) {
                tracing::warn!(error = %e, "monitor: incident persist failed");
                break;
            }
        }
        let audit = AuditRecord {
            entity_kind: "alert".to_string(),
            entity_id: alert.id.clone(),
            operation: AuditOperation::Acknowledge,
            actor,
            old_value: Some(serde_json::json!({"status": "new"})),
            new_value: Some(serde_json::json!({"status": "acknowledged"})),
            timestamp: now,
        };
        if let Err(e) = self.store.record_audit(&audit) {
            tracing::warn!(error = %e, "monitor: audit persist failed");
        }

        self.emit(MonitorEvent::AlertAcknowledged(alert.clone()));
        for incident in incident_changes.updated {
            self.emit(MonitorEvent::IncidentUpdated(incident));
        }
        Ok(alert)
    }

    /// Create or update a rule: validate, mutate, persist, audit, broadcast.
    pub fn upsert_rule(&self, rule: AlertRule, actor: AuditActor) -> VigilResult<AlertRule> {
        let now = Utc::now();
        let old = self.write_state().alert_engine.upsert_rule(rule.clone())?;

        if let Err(e) = self.store.upsert_rule(&rule) {
            tracing::warn!(error = %e, "monitor: rule persist failed");
        }
        let operation = if old.is_some() {
            AuditOperation::Update
        } else {
            AuditOperation::Create
        };
        let audit = AuditRecord {
            entity_kind: "rule".to_string(),
            entity_id: rule.id.clone(),
            operation,
            actor,
            old_value: old.map(|r| serde_json::to_value(r).unwrap_or_default()),
            new_value: Some(serde_json::to_value(&rule).unwrap_or_default()),
            timestamp: now,
        };
        if let Err(e) = self.store.record_audit(&audit) {
            tracing::warn!(error = %e, "monitor: audit persist failed");
        }

        self.emit(MonitorEvent::RuleChanged {
            rule_id: rule.id.clone(),
        });
        Ok(rule)
    }

    /// Delete a rule: mutate (resolving its active alerts), persist, audit,
    /// broadcast.
    pub fn delete_rule(&self, rule_id: &str, actor: AuditActor) -> VigilResult<()> {
        let now = Utc::now();
        let (rule, resolved) = self.write_state().alert_engine.delete_rule(rule_id, now)?;

        if let Err(e) = self.store.delete_rule(rule_id) {
            tracing::warn!(error = %e, "monitor: rule delete persist failed");
        }
        for alert in &resolved {
            if let Err(e) = self.store.upsert_alert(alert) {
                tracing::warn!(error = %e, "monitor: alert persist failed");
                break;
            }
        }
        let audit = AuditRecord {
            entity_kind: "rule".to_string(),
            entity_id: rule.id.clone(),
            operation: AuditOperation::Delete,
            actor,
            old_value: Some(serde_json::to_value(&rule).unwrap_or_default()),
            new_value: None,
            timestamp: now,
        };
        if let Err(e) = self.store.record_audit(&audit) {
            tracing::warn!(error = %e, "monitor: audit persist failed");
        }

        self.emit(MonitorEvent::RuleDeleted {
            rule_id: rule.id.clone(),
        });
        for alert in resolved {
            self.emit(MonitorEvent::AlertResolved(alert));
        }
        Ok(())
    }
}
