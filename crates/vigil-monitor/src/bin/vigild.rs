//! `vigild` — the monitoring daemon. Loads config, picks durable or
//! memory-only persistence, and runs the poll scheduler until ctrl-c.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;

use vigil_core::config::VigilConfig;
use vigil_core::traits::MonitorStore;
use vigil_fetch::{ApiClient, ApiClientConfig, CircuitBreaker, FleetCatalog};
use vigil_monitor::{run_scheduler, tracing_setup, MonitorEngine};
use vigil_storage::{MemoryStore, StorageEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_setup::init_tracing(std::env::var("VIGIL_LOG_JSON").is_ok());

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = VigilConfig::load(config_path.as_deref());

    let token = config
        .api_token
        .clone()
        .context("VIGIL_API_TOKEN is required")?;

    // Durable when configured and reachable; memory-only for the rest of
    // the process lifetime otherwise.
    let store: Arc<dyn MonitorStore> = match &config.db_path {
        Some(path) => match StorageEngine::open(path) {
            Ok(engine) => Arc::new(engine),
            Err(err) => {
                tracing::warn!(error = %err, "durable store unavailable, running memory-only");
                Arc::new(MemoryStore::new())
            }
        },
        None => {
            tracing::info!("no database configured, running memory-only");
            Arc::new(MemoryStore::new())
        }
    };

    let breaker = Arc::new(CircuitBreaker::new());
    let client = ApiClient::new(
        ApiClientConfig {
            base_url: config.api_base_url.clone(),
            token,
            timeout_secs: config.request_timeout_secs,
        },
        breaker,
    )?;
    let catalog = FleetCatalog::new(client);
    let engine = Arc::new(MonitorEngine::new(catalog, store, config));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = tokio::spawn(run_scheduler(engine, shutdown_rx));

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    let _ = shutdown_tx.send(true);
    scheduler.await?;
    Ok(())
}
