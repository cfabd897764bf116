use chrono::{Duration, Utc};
use vigil_core::models::{
    Alert, AlertRule, AlertStatus, AuditActor, AuditOperation, AuditRecord, CostEntry,
    Incident, IncidentEvent, IncidentEventKind, IncidentStatus, RuleCondition, RuleMetric,
    Severity,
};
use vigil_core::traits::MonitorStore;
use vigil_storage::{MemoryStore, StorageEngine};

fn rule(id: &str, threshold: f64) -> AlertRule {
    let now = Utc::now();
    AlertRule {
        id: id.to_string(),
        name: "high memory".to_string(),
        metric: RuleMetric::Memory,
        condition: RuleCondition::Gt,
        threshold,
        sustained_minutes: 5,
        severity: Severity::High,
        enabled: true,
        created_at: now,
        updated_at: now,
    }
}

fn alert(id: &str) -> Alert {
    Alert {
        id: id.to_string(),
        timestamp: Utc::now(),
        service_id: "svc-a".to_string(),
        severity: Severity::Critical,
        rule_id: "rule-1".to_string(),
        message: "svc-a violated rule-1".to_string(),
        status: AlertStatus::New,
        acknowledged_at: None,
        resolved_at: None,
    }
}

// ── Rules ────────────────────────────────────────────────────────────────

#[test]
fn rule_upsert_is_idempotent_on_id() {
    let store = StorageEngine::open_in_memory().unwrap();

    store.upsert_rule(&rule("rule-1", 85.0)).unwrap();
    store.upsert_rule(&rule("rule-1", 90.0)).unwrap();

    let rules = store.load_rules().unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].threshold, 90.0);
    assert_eq!(rules[0].metric, RuleMetric::Memory);
    assert_eq!(rules[0].severity, Severity::High);
}

#[test]
fn deleted_rule_disappears() {
    let store = StorageEngine::open_in_memory().unwrap();
    store.upsert_rule(&rule("rule-1", 85.0)).unwrap();
    store.delete_rule("rule-1").unwrap();
    assert!(store.load_rules().unwrap().is_empty());
}

// ── Alerts ───────────────────────────────────────────────────────────────

#[test]
fn alert_lifecycle_roundtrips() {
    let store = StorageEngine::open_in_memory().unwrap();
    let mut a = alert("a1");
    store.upsert_alert(&a).unwrap();

    a.status = AlertStatus::Resolved;
    a.resolved_at = Some(a.timestamp + Duration::minutes(3));
    store.upsert_alert(&a).unwrap();

    let loaded = store.load_alerts(10).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].status, AlertStatus::Resolved);
    assert!(loaded[0].resolved_at.is_some());
    assert_eq!(loaded[0].severity, Severity::Critical);
}

#[test]
fn load_alerts_returns_most_recent_in_order() {
    let store = StorageEngine::open_in_memory().unwrap();
    let base = Utc::now();
    for i in 0..5 {
        let mut a = alert(&format!("a{i}"));
        a.timestamp = base + Duration::minutes(i);
        store.upsert_alert(&a).unwrap();
    }

    let loaded = store.load_alerts(3).unwrap();
    let ids: Vec<&str> = loaded.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a2", "a3", "a4"]);
}

// ── Incidents ────────────────────────────────────────────────────────────

#[test]
fn incident_json_columns_roundtrip() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    let incident = Incident {
        id: "inc-1".to_string(),
        title: "api: down".to_string(),
        status: IncidentStatus::Investigating,
        severity: Severity::High,
        started_at: now,
        resolved_at: None,
        alert_ids: vec!["a1".to_string(), "a2".to_string()],
        affected_services: vec!["svc-a".to_string()],
        timeline: vec![IncidentEvent {
            timestamp: now,
            kind: IncidentEventKind::Opened,
            message: "opened".to_string(),
            alert_id: Some("a1".to_string()),
            service_id: Some("svc-a".to_string()),
        }],
        summary: None,
    };
    store.upsert_incident(&incident).unwrap();

    let loaded = store.load_incidents(10).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].alert_ids, vec!["a1", "a2"]);
    assert_eq!(loaded[0].timeline.len(), 1);
    assert_eq!(loaded[0].timeline[0].kind, IncidentEventKind::Opened);
    assert_eq!(loaded[0].status, IncidentStatus::Investigating);
}

// ── Cost entries ─────────────────────────────────────────────────────────

#[test]
fn cost_rows_upsert_on_natural_key() {
    let store = StorageEngine::open_in_memory().unwrap();
    let entry = CostEntry {
        date: "2026-08-01".to_string(),
        project_id: "proj".to_string(),
        service_id: None,
        amount_usd: 10.0,
    };
    store.upsert_cost_entry(&entry).unwrap();
    // Same (date, project, service): amount refreshed, no duplicate.
    store
        .upsert_cost_entry(&CostEntry {
            amount_usd: 12.0,
            ..entry.clone()
        })
        .unwrap();

    let count: i64 = store
        .writer()
        .with_conn_sync(|conn| {
            conn.query_row("SELECT COUNT(*) FROM cost_entries", [], |r| r.get(0))
                .map_err(|e| vigil_core::errors::StorageError::Sqlite {
                    message: e.to_string(),
                }
                .into())
        })
        .unwrap();
    assert_eq!(count, 1);
}

// ── Audit ────────────────────────────────────────────────────────────────

#[test]
fn audit_rows_capture_actor_and_values() {
    let store = StorageEngine::open_in_memory().unwrap();
    let record = AuditRecord {
        entity_kind: "rule".to_string(),
        entity_id: "rule-1".to_string(),
        operation: AuditOperation::Update,
        actor: AuditActor::User("ops".to_string()),
        old_value: Some(serde_json::json!({"threshold": 85.0})),
        new_value: Some(serde_json::json!({"threshold": 90.0})),
        timestamp: Utc::now(),
    };
    store.record_audit(&record).unwrap();

    let (actor, old_value): (String, Option<String>) = store
        .writer()
        .with_conn_sync(|conn| {
            conn.query_row(
                "SELECT actor, old_value FROM audit_log WHERE entity_id = 'rule-1'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .map_err(|e| vigil_core::errors::StorageError::Sqlite {
                message: e.to_string(),
            }
            .into())
        })
        .unwrap();
    assert_eq!(actor, "ops");
    assert!(old_value.unwrap().contains("85"));
}

// ── Durability across reopen ─────────────────────────────────────────────

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vigil.db");

    {
        let store = StorageEngine::open(&path).unwrap();
        store.upsert_rule(&rule("rule-1", 85.0)).unwrap();
        store.upsert_alert(&alert("a1")).unwrap();
    }

    let store = StorageEngine::open(&path).unwrap();
    assert_eq!(store.load_rules().unwrap().len(), 1);
    assert_eq!(store.load_alerts(10).unwrap().len(), 1);
}

// ── Memory fallback ──────────────────────────────────────────────────────

#[test]
fn memory_store_swallows_writes_and_reads_empty() {
    let store = MemoryStore::new();
    assert!(!store.is_durable());

    store.upsert_rule(&rule("rule-1", 85.0)).unwrap();
    store.upsert_alert(&alert("a1")).unwrap();

    assert!(store.load_rules().unwrap().is_empty());
    assert!(store.load_alerts(10).unwrap().is_empty());
    assert!(store.load_incidents(10).unwrap().is_empty());
}
