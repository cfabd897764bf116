//! [`IncidentEngine`] — owns the incident list and the correlation indexes.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use vigil_core::constants::INCIDENT_TEMPORAL_WINDOW_MINUTES;
use vigil_core::models::{
    Alert, AlertStatus, Incident, IncidentEvent, IncidentEventKind, IncidentStatus,
};

/// Incidents opened, updated, and resolved by one correlation pass.
#[derive(Debug, Default)]
pub struct IncidentChanges {
    pub opened: Vec<Incident>,
    pub updated: Vec<Incident>,
    pub resolved: Vec<Incident>,
}

impl IncidentChanges {
    pub fn is_empty(&self) -> bool {
        self.opened.is_empty() && self.updated.is_empty() && self.resolved.is_empty()
    }
}

/// Correlates alerts into incidents once per cycle.
///
/// Matching is deterministic: a pass preferring incidents that already cover
/// the alert's service runs before the temporal-proximity pass, each in
/// stable list order. All mutation happens inside the orchestrator's cycle
/// or its synchronous action handlers, which serializes incident writes.
#[derive(Debug, Default)]
pub struct IncidentEngine {
    incidents: Vec<Incident>,
    /// Alert ids already absorbed into some incident.
    assigned: HashSet<String>,
    /// Alert ids whose acknowledgement was already mirrored to a timeline.
    acks_mirrored: HashSet<String>,
}

impl IncidentEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted incidents (warm start).
    pub fn restore(incidents: Vec<Incident>) -> Self {
        let mut assigned = HashSet::new();
        let mut acks_mirrored = HashSet::new();
        for incident in &incidents {
            assigned.extend(incident.alert_ids.iter().cloned());
            for event in &incident.timeline {
                if event.kind == IncidentEventKind::AlertAcknowledged {
                    if let Some(id) = &event.alert_id {
                        acks_mirrored.insert(id.clone());
                    }
                }
            }
        }
        Self {
            incidents,
            assigned,
            acks_mirrored,
        }
    }

    /// One full pass: absorb unassigned alerts, mirror acknowledgements,
    /// auto-resolve completed incidents.
    pub fn process(
        &mut self,
        alerts: &[Alert],
        service_names: &HashMap<String, String>,
        now: DateTime<Utc>,
    ) -> IncidentChanges {
        let mut changes = IncidentChanges::default();
        self.correlate(alerts, service_names, &mut changes);
        self.mirror_acknowledgements(alerts, &mut changes);
        self.auto_resolve(alerts, service_names, now, &mut changes);
        changes
    }

    // ── Correlation ──────────────────────────────────────────────────────

    fn correlate(
        &mut self,
        alerts: &[Alert],
        service_names: &HashMap<String, String>,
        changes: &mut IncidentChanges,
    ) {
        let candidates: Vec<&Alert> = alerts
            .iter()
            .filter(|a| a.status != AlertStatus::Resolved && !self.assigned.contains(&a.id))
            .collect();

        for alert in candidates {
            match self.find_match(alert) {
                Some(idx) => {
                    let incident = &mut self.incidents[idx];
                    join(incident, alert);
                    self.assigned.insert(alert.id.clone());
                    upsert_changed(&mut changes.updated, incident);
                }
                None => {
                    let incident = open_incident(alert, service_names);
                    tracing::info!(
                        incident_id = %incident.id,
                        alert_id = %alert.id,
                        service_id = %alert.service_id,
                        "incident opened"
                    );
                    self.assigned.insert(alert.id.clone());
                    changes.opened.push(incident.clone());
                    self.incidents.push(incident);
                }
            }
        }
    }

    /// Affinity pass first, temporal pass second; first hit in list order
    /// wins within each pass.
    fn find_match(&self, alert: &Alert) -> Option<usize> {
        let affinity = self.incidents.iter().position(|i| {
            i.is_open() && i.affected_services.iter().any(|s| s == &alert.service_id)
        });
        if affinity.is_some() {
            return affinity;
        }
        let window = Duration::minutes(INCIDENT_TEMPORAL_WINDOW_MINUTES);
        self.incidents.iter().position(|i| {
            i.is_open() && (alert.timestamp - i.last_activity()).abs() <= window
        })
    }

    // ── Acknowledgement mirroring ────────────────────────────────────────

    /// Mirror each constituent alert's acknowledgement into its incident's
    /// timeline exactly once. The first mirrored ack moves an active
    /// incident to investigating.
    fn mirror_acknowledgements(&mut self, alerts: &[Alert], changes: &mut IncidentChanges) {
        let acked: HashMap<&str, &Alert> = alerts
            .iter()
            .filter(|a| a.status == AlertStatus::Acknowledged)
            .map(|a| (a.id.as_str(), a))
            .collect();

        for incident in self.incidents.iter_mut().filter(|i| i.is_open()) {
            let mut touched = false;
            for alert_id in incident.alert_ids.clone() {
                let Some(alert) = acked.get(alert_id.as_str()) else {
                    continue;
                };
                if !self.acks_mirrored.insert(alert_id.clone()) {
                    continue;
                }
                let at = alert.acknowledged_at.unwrap_or(alert.timestamp);
                incident.timeline.push(IncidentEvent {
                    timestamp: at,
                    kind: IncidentEventKind::AlertAcknowledged,
                    message: format!("alert acknowledged on {}", alert.service_id),
                    alert_id: Some(alert_id),
                    service_id: Some(alert.service_id.clone()),
                });
                if incident.status == IncidentStatus::Active {
                    incident.status = IncidentStatus::Investigating;
                }
                touched = true;
            }
            if touched {
                upsert_changed(&mut changes.updated, incident);
            }
        }
    }

    // ── Auto-resolution ──────────────────────────────────────────────────

    /// Resolve every open incident whose constituent alerts are all
    /// resolved, closing the timeline and generating a summary.
    fn auto_resolve(
        &mut self,
        alerts: &[Alert],
        service_names: &HashMap<String, String>,
        now: DateTime<Utc>,
        changes: &mut IncidentChanges,
    ) {
        let status_by_id: HashMap<&str, AlertStatus> =
            alerts.iter().map(|a| (a.id.as_str(), a.status)).collect();

        for incident in self.incidents.iter_mut().filter(|i| i.is_open()) {
            if incident.alert_ids.is_empty() {
                continue;
            }
            let all_resolved = incident.alert_ids.iter().all(|id| {
                status_by_id
                    .get(id.as_str())
                    .map_or(false, |s| *s == AlertStatus::Resolved)
            });
            if !all_resolved {
                continue;
            }

            incident.status = IncidentStatus::Resolved;
            incident.resolved_at = Some(now);
            incident.timeline.push(IncidentEvent {
                timestamp: now,
                kind: IncidentEventKind::AlertResolved,
                message: "all constituent alerts resolved".to_string(),
                alert_id: None,
                service_id: None,
            });

            let names: Vec<String> = incident
                .affected_services
                .iter()
                .map(|id| service_names.get(id).cloned().unwrap_or_else(|| id.clone()))
                .collect();
            let duration_minutes = (now - incident.started_at).num_minutes().max(0);
            incident.summary = Some(format!(
                "{} resolved after {} minutes ({} alerts)",
                names.join(", "),
                duration_minutes,
                incident.alert_ids.len()
            ));

            tracing::info!(
                incident_id = %incident.id,
                duration_minutes,
                alert_count = incident.alert_ids.len(),
                "incident auto-resolved"
            );
            // An incident resolved this pass supersedes its earlier update.
            changes.updated.retain(|i| i.id != incident.id);
            changes.resolved.push(incident.clone());
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn open_incidents(&self) -> Vec<&Incident> {
        self.incidents.iter().filter(|i| i.is_open()).collect()
    }

    pub fn get(&self, incident_id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.id == incident_id)
    }
}

/// Absorb an alert into an existing incident.
fn join(incident: &mut Incident, alert: &Alert) {
    incident.alert_ids.push(alert.id.clone());
    if !incident.affected_services.contains(&alert.service_id) {
        incident.affected_services.push(alert.service_id.clone());
    }
    incident.severity = incident.severity.max(alert.severity);
    incident.timeline.push(IncidentEvent {
        timestamp: alert.timestamp,
        kind: IncidentEventKind::AlertFired,
        message: alert.message.clone(),
        alert_id: Some(alert.id.clone()),
        service_id: Some(alert.service_id.clone()),
    });
}

/// Seed a fresh incident from a single alert.
fn open_incident(alert: &Alert, service_names: &HashMap<String, String>) -> Incident {
    let service_name = service_names
        .get(&alert.service_id)
        .cloned()
        .unwrap_or_else(|| alert.service_id.clone());
    Incident {
        id: uuid::Uuid::new_v4().to_string(),
        title: format!("{}: {}", service_name, alert.message),
        status: IncidentStatus::Active,
        severity: alert.severity,
        started_at: alert.timestamp,
        resolved_at: None,
        alert_ids: vec![alert.id.clone()],
        affected_services: vec![alert.service_id.clone()],
        timeline: vec![IncidentEvent {
            timestamp: alert.timestamp,
            kind: IncidentEventKind::Opened,
            message: alert.message.clone(),
            alert_id: Some(alert.id.clone()),
            service_id: Some(alert.service_id.clone()),
        }],
        summary: None,
    }
}

/// Record an incident in the updated set, replacing a stale copy.
fn upsert_changed(updated: &mut Vec<Incident>, incident: &Incident) {
    match updated.iter_mut().find(|i| i.id == incident.id) {
        Some(slot) => *slot = incident.clone(),
        None => updated.push(incident.clone()),
    }
}
