//! [`MonitorState`] — the orchestrator-owned in-memory snapshot. This is
//! the source of truth for the running process; the durable store trails it
//! best-effort.

use std::collections::{BTreeMap, HashMap, VecDeque};

use chrono::{DateTime, Utc};

use vigil_alerts::AlertEngine;
use vigil_core::constants::{
    MAX_ANOMALIES, MAX_CYCLE_ERRORS, MAX_PROBES_PER_SERVICE, MAX_SAMPLES_PER_SERVICE,
};
use vigil_core::models::{
    Anomaly, CostEntry, CostForecast, CycleError, MetricSample, ProbeRecord, Service, SlaRecord,
};
use vigil_incidents::IncidentEngine;

/// Everything one cycle reads and writes, behind a single lock in the
/// engine. No process globals: the whole engine is instantiable per test.
#[derive(Debug, Default)]
pub struct MonitorState {
    /// Keyed by service id; BTreeMap keeps iteration deterministic.
    pub services: BTreeMap<String, Service>,
    /// Per-service sample history, oldest first, capped.
    pub samples: HashMap<String, Vec<MetricSample>>,
    /// Per-service probe history, oldest first, capped.
    pub probes: HashMap<String, Vec<ProbeRecord>>,
    /// Detected anomalies across all services, oldest first, capped.
    pub anomalies: Vec<Anomaly>,
    /// Daily cost entries per project, replaced wholesale each fetch.
    pub costs: HashMap<String, Vec<CostEntry>>,
    /// Fresh SLA aggregates per service, recomputed each cycle.
    pub sla: HashMap<String, Vec<SlaRecord>>,
    /// Cost forecast per project, recomputed each cycle.
    pub forecasts: HashMap<String, CostForecast>,
    pub alert_engine: AlertEngine,
    pub incident_engine: IncidentEngine,
    /// Rolling diagnostics log, oldest first, capped.
    pub errors: VecDeque<CycleError>,
    /// When the last cycle ran, successful or not.
    pub last_poll: Option<DateTime<Utc>>,
    /// When a cycle last completed without a top-level error. Staleness is
    /// observable on the dashboard even when per-service errors are silent.
    pub last_success: Option<DateTime<Utc>>,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append samples for a service, trimming from the oldest end.
    pub fn push_samples(&mut self, service_id: &str, new: Vec<MetricSample>) {
        let history = self.samples.entry(service_id.to_string()).or_default();
        history.extend(new);
        if history.len() > MAX_SAMPLES_PER_SERVICE {
            history.drain(..history.len() - MAX_SAMPLES_PER_SERVICE);
        }
    }

    /// Append a probe record, trimming from the oldest end.
    pub fn push_probe(&mut self, record: ProbeRecord) {
        let history = self.probes.entry(record.service_id.clone()).or_default();
        history.push(record);
        if history.len() > MAX_PROBES_PER_SERVICE {
            history.drain(..history.len() - MAX_PROBES_PER_SERVICE);
        }
    }

    /// Append anomalies, trimming from the oldest end.
    pub fn push_anomalies(&mut self, new: Vec<Anomaly>) {
        self.anomalies.extend(new);
        if self.anomalies.len() > MAX_ANOMALIES {
            let excess = self.anomalies.len() - MAX_ANOMALIES;
            self.anomalies.drain(..excess);
        }
    }

    /// Record a caught per-service or cycle-level failure.
    pub fn push_error(&mut self, error: CycleError) {
        self.errors.push_back(error);
        while self.errors.len() > MAX_CYCLE_ERRORS {
            self.errors.pop_front();
        }
    }

    /// Service-id → display-name map for incident titles and summaries.
    pub fn service_names(&self) -> HashMap<String, String> {
        self.services
            .values()
            .map(|s| (s.id.clone(), s.name.clone()))
            .collect()
    }

    /// All cost entries across projects, for detectors and forecasting.
    pub fn all_costs(&self) -> Vec<CostEntry> {
        self.costs.values().flatten().cloned().collect()
    }
}
