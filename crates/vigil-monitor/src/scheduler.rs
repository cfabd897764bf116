//! The poll scheduler: an immediate first cycle, then a fixed interval,
//! with cooperative shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use vigil_core::traits::ServiceCatalog;

use crate::engine::MonitorEngine;

/// Run the poll loop until `shutdown` flips to true. The first tick fires
/// immediately; later ticks follow the configured interval. Cycle errors
/// are logged and the next tick retries.
pub async fn run_scheduler<C: ServiceCatalog>(
    engine: Arc<MonitorEngine<C>>,
    mut shutdown: watch::Receiver<bool>,
) {
    let period = Duration::from_secs(engine.config().poll_interval_secs.max(1));
    let mut ticker = tokio::time::interval(period);
    // A long cycle must not cause a burst of catch-up polls.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(period_secs = period.as_secs(), "monitor: scheduler started");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = engine.poll().await {
                    tracing::error!(error = %err, "monitor: poll failed, retrying next tick");
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    tracing::info!("monitor: scheduler stopped");
}
