//! [`StorageEngine`] — owns the write connection, runs migrations at open,
//! implements [`MonitorStore`].

use std::path::Path;

use vigil_core::errors::VigilResult;
use vigil_core::models::{
    Alert, AlertRule, Anomaly, AuditRecord, CostEntry, CycleError, Incident, MetricSample,
    ProbeRecord, Service, SlaRecord,
};
use vigil_core::traits::MonitorStore;

use crate::audit::AuditLogger;
use crate::migrations;
use crate::pool::WriteConnection;
use crate::queries;

/// The durable store. Every operation takes the write connection for the
/// duration of one statement batch.
pub struct StorageEngine {
    writer: WriteConnection,
}

impl StorageEngine {
    /// Open a database file and bring the schema up to date.
    pub fn open(path: &Path) -> VigilResult<Self> {
        let writer = WriteConnection::open(path)?;
        let engine = Self { writer };
        engine.initialize()?;
        Ok(engine)
    }

    /// In-memory engine (for testing).
    pub fn open_in_memory() -> VigilResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        let engine = Self { writer };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> VigilResult<()> {
        self.writer.with_conn_sync(migrations::run_migrations)
    }

    /// Access the write connection (advanced operations and tests).
    pub fn writer(&self) -> &WriteConnection {
        &self.writer
    }
}

impl MonitorStore for StorageEngine {
    fn upsert_service(&self, service: &Service) -> VigilResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::service_ops::upsert_service(conn, service))
    }

    fn upsert_alert(&self, alert: &Alert) -> VigilResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::alert_ops::upsert_alert(conn, alert))
    }

    fn upsert_incident(&self, incident: &Incident) -> VigilResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::incident_ops::upsert_incident(conn, incident))
    }

    fn upsert_cost_entry(&self, entry: &CostEntry) -> VigilResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::cost_ops::upsert_cost_entry(conn, entry))
    }

    fn upsert_sla_record(&self, record: &SlaRecord) -> VigilResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::cost_ops::upsert_sla_record(conn, record))
    }

    fn upsert_rule(&self, rule: &AlertRule) -> VigilResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::rule_ops::upsert_rule(conn, rule))
    }

    fn delete_rule(&self, rule_id: &str) -> VigilResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::rule_ops::delete_rule(conn, rule_id))
    }

    fn record_samples(&self, samples: &[MetricSample]) -> VigilResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::telemetry_ops::insert_samples(conn, samples))
    }

    fn record_anomalies(&self, anomalies: &[Anomaly]) -> VigilResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::telemetry_ops::insert_anomalies(conn, anomalies))
    }

    fn record_probes(&self, probes: &[ProbeRecord]) -> VigilResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::telemetry_ops::insert_probes(conn, probes))
    }

    fn record_audit(&self, record: &AuditRecord) -> VigilResult<()> {
        self.writer.with_conn_sync(|conn| AuditLogger::log(conn, record))
    }

    fn record_cycle_error(&self, error: &CycleError) -> VigilResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::telemetry_ops::insert_cycle_error(conn, error))
    }

    fn load_rules(&self) -> VigilResult<Vec<AlertRule>> {
        self.writer.with_conn_sync(queries::rule_ops::load_rules)
    }

    fn load_alerts(&self, limit: usize) -> VigilResult<Vec<Alert>> {
        self.writer
            .with_conn_sync(|conn| queries::alert_ops::load_alerts(conn, limit))
    }

    fn load_incidents(&self, limit: usize) -> VigilResult<Vec<Incident>> {
        self.writer
            .with_conn_sync(|conn| queries::incident_ops::load_incidents(conn, limit))
    }

    fn is_durable(&self) -> bool {
        true
    }
}
