use crate::errors::VigilResult;
use crate::models::{
    Alert, AlertRule, Anomaly, AuditRecord, CostEntry, CycleError, Incident, MetricSample,
    ProbeRecord, Service, SlaRecord,
};

/// Durable persistence boundary. Object-safe so the engine can select the
/// SQLite or memory implementation at startup and hold it behind `Arc<dyn>`.
///
/// The in-memory snapshot is the source of truth for a running process;
/// these writes are best-effort. Implementations must make upserts
/// idempotent on natural keys (rule id; (date, project, service) for cost
/// rows) so a retried cycle never duplicates data.
pub trait MonitorStore: Send + Sync {
    // --- Upserts (idempotent on natural keys) ---
    fn upsert_service(&self, service: &Service) -> VigilResult<()>;
    fn upsert_alert(&self, alert: &Alert) -> VigilResult<()>;
    fn upsert_incident(&self, incident: &Incident) -> VigilResult<()>;
    fn upsert_cost_entry(&self, entry: &CostEntry) -> VigilResult<()>;
    fn upsert_sla_record(&self, record: &SlaRecord) -> VigilResult<()>;
    fn upsert_rule(&self, rule: &AlertRule) -> VigilResult<()>;
    fn delete_rule(&self, rule_id: &str) -> VigilResult<()>;

    // --- Append-only ---
    fn record_samples(&self, samples: &[MetricSample]) -> VigilResult<()>;
    fn record_anomalies(&self, anomalies: &[Anomaly]) -> VigilResult<()>;
    fn record_probes(&self, probes: &[ProbeRecord]) -> VigilResult<()>;
    fn record_audit(&self, record: &AuditRecord) -> VigilResult<()>;
    fn record_cycle_error(&self, error: &CycleError) -> VigilResult<()>;

    // --- Reads (warm-start state recovery; empty in memory-only mode) ---
    fn load_rules(&self) -> VigilResult<Vec<AlertRule>>;
    fn load_alerts(&self, limit: usize) -> VigilResult<Vec<Alert>>;
    fn load_incidents(&self, limit: usize) -> VigilResult<Vec<Incident>>;

    /// False for the memory fallback, surfaced on the dashboard.
    fn is_durable(&self) -> bool;
}
