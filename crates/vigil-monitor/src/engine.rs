//! [`MonitorEngine`] — owns the snapshot, the subsystem engines, the
//! injected store, and the broadcast channel.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::broadcast;

use vigil_alerts::AlertEngine;
use vigil_core::config::VigilConfig;
use vigil_core::traits::{MonitorStore, ServiceCatalog};
use vigil_incidents::IncidentEngine;

use crate::events::MonitorEvent;
use crate::state::MonitorState;

/// Broadcast channel capacity; laggards drop events instead of blocking.
const EVENT_CAPACITY: usize = 256;

/// How many alerts/incidents to recover from the durable store at startup.
const WARM_START_LIMIT: usize = 500;

/// One engine per process. Generic over the catalog so tests can inject an
/// in-process double; the store is selected at startup (durable or memory)
/// and injected as a trait object.
pub struct MonitorEngine<C: ServiceCatalog> {
    pub(crate) catalog: C,
    pub(crate) store: Arc<dyn MonitorStore>,
    pub(crate) config: VigilConfig,
    pub(crate) state: RwLock<MonitorState>,
    /// Single-flight guard: a poll arriving while one runs is a no-op.
    pub(crate) in_flight: AtomicBool,
    pub(crate) events: broadcast::Sender<MonitorEvent>,
}

impl<C: ServiceCatalog> MonitorEngine<C> {
    /// Build an engine, warm-starting alert and incident state from the
    /// durable store (empty in memory-only mode).
    pub fn new(catalog: C, store: Arc<dyn MonitorStore>, config: VigilConfig) -> Self {
        let mut state = MonitorState::new();
        state.alert_engine = match (store.load_rules(), store.load_alerts(WARM_START_LIMIT)) {
            (Ok(rules), Ok(alerts)) => AlertEngine::restore(rules, alerts),
            _ => AlertEngine::new(),
        };
        state.incident_engine = match store.load_incidents(WARM_START_LIMIT) {
            Ok(incidents) => IncidentEngine::restore(incidents),
            Err(_) => IncidentEngine::new(),
        };

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            catalog,
            store,
            config,
            state: RwLock::new(state),
            in_flight: AtomicBool::new(false),
            events,
        }
    }

    /// Subscribe to delta events.
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &VigilConfig {
        &self.config
    }

    /// The injected catalog (handy for tests that reshape the fleet).
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Whether writes actually reach a durable store.
    pub fn is_durable(&self) -> bool {
        self.store.is_durable()
    }

    pub(crate) fn read_state(&self) -> RwLockReadGuard<'_, MonitorState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn write_state(&self) -> RwLockWriteGuard<'_, MonitorState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn emit(&self, event: MonitorEvent) {
        // Send only fails when nobody is subscribed, which is fine.
        let _ = self.events.send(event);
    }
}
