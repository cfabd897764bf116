//! The poll cycle: fetch phase (no locks), processing phase (one write
//! lock, no awaits), persistence phase (best-effort), then broadcast.

use std::sync::atomic::Ordering;
use std::time::Instant;

use chrono::{DateTime, Utc};

use vigil_core::errors::{VigilError, VigilResult};
use vigil_core::models::{
    Alert, Anomaly, CostEntry, CycleError, HealthProbe, Incident, MetricSample, ProbeRecord,
    Service, ServiceStatus, SlaRecord,
};
use vigil_core::traits::ServiceCatalog;
use vigil_incidents::IncidentChanges;
use vigil_metrics::{detect_cost, detect_statistical, detect_trend};
use vigil_sla::{compute_sla, compute_window};

use crate::engine::MonitorEngine;
use crate::events::MonitorEvent;

/// Everything the fetch phase gathered before the lock is taken.
#[derive(Default)]
struct FetchOutcome {
    services: Vec<Service>,
    fetched_projects: Vec<String>,
    samples: Vec<MetricSample>,
    probes: Vec<(String, HealthProbe)>,
    costs: Vec<(String, Vec<CostEntry>)>,
    errors: Vec<CycleError>,
}

/// Rows the processing phase decided to write durably.
#[derive(Default)]
struct PersistBundle {
    services: Vec<Service>,
    samples: Vec<MetricSample>,
    probes: Vec<ProbeRecord>,
    anomalies: Vec<Anomaly>,
    alerts: Vec<Alert>,
    incidents: Vec<Incident>,
    costs: Vec<CostEntry>,
    sla: Vec<SlaRecord>,
    errors: Vec<CycleError>,
}

impl<C: ServiceCatalog> MonitorEngine<C> {
    /// Run one poll cycle. A call while a cycle is in flight returns
    /// immediately — not queued, not retried.
    pub async fn poll(&self) -> VigilResult<()> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("monitor: poll already in flight, skipping");
            return Ok(());
        }

        let started = Instant::now();
        let result = self.run_cycle().await;
        self.in_flight.store(false, Ordering::SeqCst);

        match &result {
            Ok(()) => {
                let (at, services) = {
                    let state = self.read_state();
                    (state.last_poll.unwrap_or_else(Utc::now), state.services.len())
                };
                let duration_ms = started.elapsed().as_millis() as u64;
                tracing::info!(services, duration_ms, "monitor: cycle complete");
                self.emit(MonitorEvent::PollCompleted {
                    at,
                    services,
                    duration_ms,
                });
            }
            Err(err) => {
                // Unrecoverable for this cycle; the next tick retries.
                tracing::error!(error = %err, "monitor: cycle aborted");
                let error = CycleError::new(Utc::now(), "cycle", err.to_string());
                self.write_state().push_error(error.clone());
                if let Err(e) = self.store.record_cycle_error(&error) {
                    tracing::warn!(error = %e, "monitor: failed to persist cycle error");
                }
            }
        }
        result
    }

    async fn run_cycle(&self) -> VigilResult<()> {
        if self.config.api_token.is_none() {
            return Err(VigilError::MissingCredentials);
        }
        let now = Utc::now();

        let outcome = self.fetch_phase(now).await;
        let (bundle, alert_events, incident_changes) = self.process_phase(outcome, now);
        self.persist_phase(&bundle);

        for alert in alert_events.raised {
            self.emit(MonitorEvent::AlertRaised(alert));
        }
        for alert in alert_events.resolved {
            self.emit(MonitorEvent::AlertResolved(alert));
        }
        for incident in incident_changes.opened {
            self.emit(MonitorEvent::IncidentOpened(incident));
        }
        for incident in incident_changes.updated {
            self.emit(MonitorEvent::IncidentUpdated(incident));
        }
        for incident in incident_changes.resolved {
            self.emit(MonitorEvent::IncidentResolved(incident));
        }
        Ok(())
    }

    // ── Fetch phase ──────────────────────────────────────────────────────

    /// Pull service lists, metrics, probes, and usage. Every per-service or
    /// per-project failure is recorded and skipped; nothing here aborts.
    async fn fetch_phase(&self, now: DateTime<Utc>) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();

        for project in &self.config.project_ids {
            match self.catalog.list_services(project).await {
                Ok(services) => {
                    outcome.fetched_projects.push(project.clone());
                    outcome.services.extend(services);
                }
                Err(err) => {
                    tracing::warn!(project = %project, error = %err, "monitor: service list failed");
                    outcome.errors.push(CycleError::new(
                        now,
                        format!("services:{project}"),
                        err.to_string(),
                    ));
                }
            }
        }

        for service in &outcome.services {
            match self.catalog.fetch_metrics(service).await {
                Ok(Some(sample)) => outcome.samples.push(sample),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(service_id = %service.id, error = %err, "monitor: metrics fetch failed");
                    outcome.errors.push(CycleError::new(
                        now,
                        format!("metrics:{}", service.id),
                        err.to_string(),
                    ));
                }
            }
            if let Some(url) = &service.health_url {
                // Probes never raise; a failure is an ok=false result.
                let probe = self.catalog.probe_health(url).await;
                outcome.probes.push((service.id.clone(), probe));
            }
        }

        for project in &self.config.project_ids {
            match self.catalog.fetch_usage(project).await {
                Ok(entries) => outcome.costs.push((project.clone(), entries)),
                Err(err) => {
                    tracing::warn!(project = %project, error = %err, "monitor: usage fetch failed");
                    outcome.errors.push(CycleError::new(
                        now,
                        format!("usage:{project}"),
                        err.to_string(),
                    ));
                }
            }
        }

        outcome
    }

    // ── Processing phase ─────────────────────────────────────────────────

    /// Fold fetch results into the snapshot and run every computation.
    /// Synchronous: the write lock is never held across an await.
    fn process_phase(
        &self,
        outcome: FetchOutcome,
        now: DateTime<Utc>,
    ) -> (PersistBundle, vigil_alerts::AlertChanges, IncidentChanges) {
        let mut guard = self.write_state();
        let state = &mut *guard;
        let mut bundle = PersistBundle::default();

        for error in outcome.errors {
            state.push_error(error.clone());
            bundle.errors.push(error);
        }

        // Mark services missing from a successfully fetched listing as
        // removed. Never delete.
        let fetched_ids: std::collections::HashSet<&str> =
            outcome.services.iter().map(|s| s.id.as_str()).collect();
        for service in state.services.values_mut() {
            if outcome.fetched_projects.contains(&service.project_id)
                && !fetched_ids.contains(service.id.as_str())
                && service.status != ServiceStatus::Removed
            {
                tracing::info!(service_id = %service.id, "monitor: service left the catalog");
                service.status = ServiceStatus::Removed;
                service.updated_at = now;
                bundle.services.push(service.clone());
            }
        }

        // Upsert fetched services, carrying forward gauges until fresh
        // samples overwrite them.
        let fetched: Vec<String> = outcome.services.iter().map(|s| s.id.clone()).collect();
        for mut service in outcome.services {
            if let Some(prev) = state.services.get(&service.id) {
                service.cpu_percent = prev.cpu_percent;
                service.memory_mb = prev.memory_mb;
                service.uptime_percent = prev.uptime_percent;
            }
            state.services.insert(service.id.clone(), service);
        }

        // Fold in samples: refresh gauges, extend history.
        for sample in &outcome.samples {
            if let Some(service) = state.services.get_mut(&sample.service_id) {
                service.cpu_percent = sample.cpu_percent;
                service.memory_mb = sample.memory_mb;
            }
        }
        let mut by_service: std::collections::HashMap<String, Vec<MetricSample>> =
            std::collections::HashMap::new();
        for sample in outcome.samples {
            bundle.samples.push(sample.clone());
            by_service
                .entry(sample.service_id.clone())
                .or_default()
                .push(sample);
        }
        for (service_id, samples) in by_service {
            state.push_samples(&service_id, samples);
        }

        // Fold in probes and refresh per-service uptime from the day window.
        for (service_id, probe) in outcome.probes {
            let record = ProbeRecord::from_probe(&service_id, now, &probe);
            bundle.probes.push(record.clone());
            state.push_probe(record);
            let uptime = state
                .probes
                .get(&service_id)
                .map(|history| {
                    compute_window(&service_id, history, vigil_core::models::SlaPeriod::Day, now)
                        .uptime_percent
                })
                .unwrap_or(100.0);
            if let Some(service) = state.services.get_mut(&service_id) {
                service.uptime_percent = uptime;
            }
        }

        // Fetched services persist with their refreshed gauges and uptime.
        for service_id in &fetched {
            if let Some(service) = state.services.get(service_id) {
                bundle.services.push(service.clone());
            }
        }

        // Replace cost history per project.
        for (project, entries) in outcome.costs {
            bundle.costs.extend(entries.iter().cloned());
            state.costs.insert(project, entries);
        }

        // Anomaly detection over the updated history.
        let mut new_anomalies: Vec<Anomaly> = Vec::new();
        for (service_id, samples) in &state.samples {
            new_anomalies.extend(detect_statistical(service_id, samples, now));
            new_anomalies.extend(detect_trend(service_id, samples, now));
        }
        for (project, entries) in &state.costs {
            new_anomalies.extend(detect_cost(project, entries, now));
        }
        bundle.anomalies = new_anomalies.clone();
        state.push_anomalies(new_anomalies);

        // Alert rules, then incident correlation over the updated alerts.
        let services: Vec<Service> = state.services.values().cloned().collect();
        let alert_changes = state
            .alert_engine
            .evaluate(&services, &state.anomalies, now);
        bundle.alerts.extend(alert_changes.raised.iter().cloned());
        bundle.alerts.extend(alert_changes.resolved.iter().cloned());

        let names = state.service_names();
        let all_alerts = state.alert_engine.alerts().to_vec();
        let incident_changes = state.incident_engine.process(&all_alerts, &names, now);
        bundle.incidents.extend(incident_changes.opened.iter().cloned());
        bundle.incidents.extend(incident_changes.updated.iter().cloned());
        bundle.incidents.extend(incident_changes.resolved.iter().cloned());

        // SLA windows per service, always a fresh aggregate.
        let mut sla = std::collections::HashMap::new();
        for service_id in state.services.keys() {
            let empty = Vec::new();
            let history = state.probes.get(service_id).unwrap_or(&empty);
            let records = compute_sla(service_id, history, now);
            bundle.sla.extend(records.iter().cloned());
            sla.insert(service_id.clone(), records);
        }
        state.sla = sla;

        // Cost forecast per project.
        state.forecasts = state
            .costs
            .iter()
            .map(|(project, entries)| (project.clone(), vigil_forecast::forecast_costs(entries)))
            .collect();

        state.last_poll = Some(now);
        state.last_success = Some(now);

        (bundle, alert_changes, incident_changes)
    }

    // ── Persistence phase ────────────────────────────────────────────────

    /// Best-effort durable writes. A down store degrades silently: warn
    /// once per write family, never propagate.
    fn persist_phase(&self, bundle: &PersistBundle) {
        let store = &self.store;

        for service in &bundle.services {
            if let Err(e) = store.upsert_service(service) {
                tracing::warn!(error = %e, "monitor: service persist failed");
                break;
            }
        }
        if let Err(e) = store.record_samples(&bundle.samples) {
            tracing::warn!(error = %e, "monitor: sample persist failed");
        }
        if let Err(e) = store.record_probes(&bundle.probes) {
            tracing::warn!(error = %e, "monitor: probe persist failed");
        }
        if let Err(e) = store.record_anomalies(&bundle.anomalies) {
            tracing::warn!(error = %e, "monitor: anomaly persist failed");
        }
        for alert in &bundle.alerts {
            if let Err(e) = store.upsert_alert(alert) {
                tracing::warn!(error = %e, "monitor: alert persist failed");
                break;
            }
        }
        for incident in &bundle.incidents {
            if let Err(e) = store.upsert_incident(incident) {
                tracing::warn!(error = %e, "monitor: incident persist failed");
                break;
            }
        }
        for entry in &bundle.costs {
            if let Err(e) = store.upsert_cost_entry(entry) {
                tracing::warn!(error = %e, "monitor: cost persist failed");
                break;
            }
        }
        for record in &bundle.sla {
            if let Err(e) = store.upsert_sla_record(record) {
                tracing::warn!(error = %e, "monitor: sla persist failed");
                break;
            }
        }
        for error in &bundle.errors {
            if let Err(e) = store.record_cycle_error(error) {
                tracing::warn!(error = %e, "monitor: error-log persist failed");
                break;
            }
        }
    }
}
