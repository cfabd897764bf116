//! [`MemoryStore`] — the no-op fallback when the durable store can't be
//! opened at startup. Selected once; the process stays memory-only for its
//! lifetime with no reconnect loop.

use vigil_core::errors::VigilResult;
use vigil_core::models::{
    Alert, AlertRule, Anomaly, AuditRecord, CostEntry, CycleError, Incident, MetricSample,
    ProbeRecord, Service, SlaRecord,
};
use vigil_core::traits::MonitorStore;

/// Writes are no-ops, reads come back empty. The in-memory snapshot inside
/// the engine remains the only state.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryStore;

impl MemoryStore {
    pub fn new() -> Self {
        Self
    }
}

impl MonitorStore for MemoryStore {
    fn upsert_service(&self, _service: &Service) -> VigilResult<()> {
        Ok(())
    }

    fn upsert_alert(&self, _alert: &Alert) -> VigilResult<()> {
        Ok(())
    }

    fn upsert_incident(&self, _incident: &Incident) -> VigilResult<()> {
        Ok(())
    }

    fn upsert_cost_entry(&self, _entry: &CostEntry) -> VigilResult<()> {
        Ok(())
    }

    fn upsert_sla_record(&self, _record: &SlaRecord) -> VigilResult<()> {
        Ok(())
    }

    fn upsert_rule(&self, _rule: &AlertRule) -> VigilResult<()> {
        Ok(())
    }

    fn delete_rule(&self, _rule_id: &str) -> VigilResult<()> {
        Ok(())
    }

    fn record_samples(&self, _samples: &[MetricSample]) -> VigilResult<()> {
        Ok(())
    }

    fn record_anomalies(&self, _anomalies: &[Anomaly]) -> VigilResult<()> {
        Ok(())
    }

    fn record_probes(&self, _probes: &[ProbeRecord]) -> VigilResult<()> {
        Ok(())
    }

    fn record_audit(&self, _record: &AuditRecord) -> VigilResult<()> {
        Ok(())
    }

    fn record_cycle_error(&self, _error: &CycleError) -> VigilResult<()> {
        Ok(())
    }

    fn load_rules(&self) -> VigilResult<Vec<AlertRule>> {
        Ok(Vec::new())
    }

    fn load_alerts(&self, _limit: usize) -> VigilResult<Vec<Alert>> {
        Ok(Vec::new())
    }

    fn load_incidents(&self, _limit: usize) -> VigilResult<Vec<Incident>> {
        Ok(Vec::new())
    }

    fn is_durable(&self) -> bool {
        false
    }
}
