use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use vigil_core::models::{Alert, AlertStatus, IncidentEventKind, IncidentStatus, Severity};
use vigil_incidents::IncidentEngine;

fn alert(id: &str, service: &str, severity: Severity, at: DateTime<Utc>) -> Alert {
    Alert {
        id: id.to_string(),
        timestamp: at,
        service_id: service.to_string(),
        severity,
        rule_id: "rule-1".to_string(),
        message: format!("{service} violated rule-1"),
        status: AlertStatus::New,
        acknowledged_at: None,
        resolved_at: None,
    }
}

fn resolved(mut a: Alert, at: DateTime<Utc>) -> Alert {
    a.status = AlertStatus::Resolved;
    a.resolved_at = Some(at);
    a
}

fn names() -> HashMap<String, String> {
    HashMap::from([
        ("svc-x".to_string(), "api".to_string()),
        ("svc-y".to_string(), "worker".to_string()),
    ])
}

// ── Correlation ──────────────────────────────────────────────────────────

#[test]
fn temporally_close_alerts_merge_into_one_incident() {
    let mut engine = IncidentEngine::new();
    let now = Utc::now();
    let alerts = vec![
        alert("a1", "svc-x", Severity::Medium, now),
        alert("a2", "svc-y", Severity::Medium, now + Duration::minutes(2)),
    ];

    let changes = engine.process(&alerts, &names(), now + Duration::minutes(2));
    assert_eq!(changes.opened.len(), 1);
    assert_eq!(engine.incidents().len(), 1);

    let incident = &engine.incidents()[0];
    assert_eq!(incident.alert_ids, vec!["a1", "a2"]);
    assert_eq!(
        incident.affected_services,
        vec!["svc-x".to_string(), "svc-y".to_string()]
    );
}

#[test]
fn distant_alerts_open_separate_incidents() {
    let mut engine = IncidentEngine::new();
    let now = Utc::now();

    engine.process(&[alert("a1", "svc-x", Severity::Low, now)], &names(), now);
    let later = now + Duration::minutes(20);
    engine.process(
        &[
            alert("a1", "svc-x", Severity::Low, now),
            alert("a2", "svc-y", Severity::Low, later),
        ],
        &names(),
        later,
    );

    assert_eq!(engine.incidents().len(), 2);
}

#[test]
fn same_service_joins_even_outside_the_temporal_window() {
    let mut engine = IncidentEngine::new();
    let now = Utc::now();

    engine.process(&[alert("a1", "svc-x", Severity::Low, now)], &names(), now);
    // Same service an hour later: affinity wins over temporal distance.
    let later = now + Duration::hours(1);
    let mut second = alert("a2", "svc-x", Severity::Low, later);
    second.rule_id = "rule-2".to_string();
    engine.process(
        &[alert("a1", "svc-x", Severity::Low, now), second],
        &names(),
        later,
    );

    assert_eq!(engine.incidents().len(), 1);
    assert_eq!(engine.incidents()[0].alert_ids.len(), 2);
}

#[test]
fn affinity_match_is_preferred_over_temporal_match() {
    let mut engine = IncidentEngine::new();
    let now = Utc::now();

    // Incident 1 covers svc-y, incident 2 covers svc-x, both recent.
    engine.process(&[alert("a1", "svc-y", Severity::Low, now)], &names(), now);
    let later = now + Duration::minutes(20);
    engine.process(
        &[
            alert("a1", "svc-y", Severity::Low, now),
            alert("a2", "svc-x", Severity::Low, later),
        ],
        &names(),
        later,
    );
    assert_eq!(engine.incidents().len(), 2);

    // Refresh incident 1's timeline so it would win a temporal match...
    let mut a4 = alert("a4", "svc-y", Severity::Low, later);
    a4.rule_id = "rule-2".to_string();
    engine.process(
        &[
            alert("a1", "svc-y", Severity::Low, now),
            alert("a2", "svc-x", Severity::Low, later),
            a4.clone(),
        ],
        &names(),
        later,
    );

    // ...then a svc-x alert one minute later must still land on the svc-x
    // incident: affinity beats temporal proximity.
    let third = alert("a3", "svc-x", Severity::Low, later + Duration::minutes(1));
    engine.process(
        &[
            alert("a1", "svc-y", Severity::Low, now),
            alert("a2", "svc-x", Severity::Low, later),
            a4,
            third,
        ],
        &names(),
        later + Duration::minutes(1),
    );

    let with_x = engine
        .incidents()
        .iter()
        .find(|i| i.affected_services.contains(&"svc-x".to_string()))
        .unwrap();
    assert_eq!(with_x.alert_ids, vec!["a2", "a3"]);
}

#[test]
fn resolved_and_assigned_alerts_are_not_recorrelated() {
    let mut engine = IncidentEngine::new();
    let now = Utc::now();
    let a1 = alert("a1", "svc-x", Severity::Low, now);

    engine.process(&[a1.clone()], &names(), now);
    // Same alert again on the next cycle: no duplicate membership.
    engine.process(&[a1.clone()], &names(), now + Duration::minutes(5));
    assert_eq!(engine.incidents()[0].alert_ids.len(), 1);

    // A resolved alert never seeds an incident.
    let r = resolved(alert("a9", "svc-y", Severity::Low, now), now);
    let changes = engine.process(&[a1, r], &names(), now + Duration::minutes(6));
    assert!(changes.opened.is_empty());
}

// ── Severity ─────────────────────────────────────────────────────────────

#[test]
fn incident_severity_tracks_max_of_constituents() {
    let mut engine = IncidentEngine::new();
    let now = Utc::now();

    engine.process(&[alert("a1", "svc-x", Severity::Low, now)], &names(), now);
    assert_eq!(engine.incidents()[0].severity, Severity::Low);

    let critical = alert("a2", "svc-x", Severity::Critical, now + Duration::minutes(1));
    engine.process(
        &[alert("a1", "svc-x", Severity::Low, now), critical],
        &names(),
        now + Duration::minutes(1),
    );
    assert_eq!(engine.incidents()[0].severity, Severity::Critical);
}

// ── Acknowledgement mirroring ────────────────────────────────────────────

#[test]
fn acknowledgement_is_mirrored_exactly_once() {
    let mut engine = IncidentEngine::new();
    let now = Utc::now();
    let mut a1 = alert("a1", "svc-x", Severity::Medium, now);
    engine.process(&[a1.clone()], &names(), now);

    a1.status = AlertStatus::Acknowledged;
    a1.acknowledged_at = Some(now + Duration::minutes(1));

    engine.process(&[a1.clone()], &names(), now + Duration::minutes(1));
    engine.process(&[a1.clone()], &names(), now + Duration::minutes(2));

    let incident = &engine.incidents()[0];
    let ack_events = incident
        .timeline
        .iter()
        .filter(|e| e.kind == IncidentEventKind::AlertAcknowledged)
        .count();
    assert_eq!(ack_events, 1);
    assert_eq!(incident.status, IncidentStatus::Investigating);
}

// ── Auto-resolution ──────────────────────────────────────────────────────

#[test]
fn incident_resolves_only_when_every_alert_resolves() {
    let mut engine = IncidentEngine::new();
    let now = Utc::now();
    let a1 = alert("a1", "svc-x", Severity::Medium, now);
    let a2 = alert("a2", "svc-y", Severity::High, now + Duration::minutes(1));
    engine.process(&[a1.clone(), a2.clone()], &names(), now + Duration::minutes(1));
    assert_eq!(engine.incidents().len(), 1);

    // One of two resolved: still open.
    let t2 = now + Duration::minutes(10);
    let changes = engine.process(&[resolved(a1.clone(), t2), a2.clone()], &names(), t2);
    assert!(changes.resolved.is_empty());
    assert!(engine.incidents()[0].is_open());

    // Both resolved: closes with summary and closing event.
    let t3 = now + Duration::minutes(12);
    let changes = engine.process(
        &[resolved(a1, t2), resolved(a2, t3)],
        &names(),
        t3,
    );
    assert_eq!(changes.resolved.len(), 1);

    let incident = &engine.incidents()[0];
    assert_eq!(incident.status, IncidentStatus::Resolved);
    assert_eq!(incident.resolved_at, Some(t3));
    assert_eq!(
        incident.timeline.last().unwrap().kind,
        IncidentEventKind::AlertResolved
    );
    let summary = incident.summary.as_deref().expect("summary");
    assert!(summary.contains("api"), "summary names services: {summary}");
    assert!(summary.contains("2 alerts"), "summary counts alerts: {summary}");
}

#[test]
fn restore_rebuilds_assignment_and_ack_dedup() {
    let mut engine = IncidentEngine::new();
    let now = Utc::now();
    let mut a1 = alert("a1", "svc-x", Severity::Medium, now);
    engine.process(&[a1.clone()], &names(), now);
    a1.status = AlertStatus::Acknowledged;
    a1.acknowledged_at = Some(now + Duration::minutes(1));
    engine.process(&[a1.clone()], &names(), now + Duration::minutes(1));

    let mut restored = IncidentEngine::restore(engine.incidents().to_vec());
    // Neither re-correlated nor re-mirrored after a restart.
    restored.process(&[a1], &names(), now + Duration::minutes(2));
    let incident = &restored.incidents()[0];
    assert_eq!(incident.alert_ids.len(), 1);
    assert_eq!(
        incident
            .timeline
            .iter()
            .filter(|e| e.kind == IncidentEventKind::AlertAcknowledged)
            .count(),
        1
    );
}
