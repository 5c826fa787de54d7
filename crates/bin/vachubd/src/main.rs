//! # vachubd: vachub daemon
//!
//! Composition root that wires the Deebot integration to simulated bots and
//! an in-memory host.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the tracing subscriber
//! - Build one virtual bot per configured device and hand them to the hub
//! - Set up the integration, optionally seed the bots' initial state
//! - Log host changes until SIGINT, then tear the integration down
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use vachub_adapter_deebot::DeebotIntegration;
use vachub_adapter_virtual::VirtualBot;
use vachub_app::hub::Hub;
use vachub_app::ports::Integration;
use vachub_app::state_store::{HostEvent, InMemoryStateStore};

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Bots
    let bots: Vec<Arc<VirtualBot>> = config
        .device_infos()?
        .into_iter()
        .map(|info| Arc::new(VirtualBot::new(info)))
        .collect();

    // Host
    let store = Arc::new(InMemoryStateStore::default());
    let watcher = tokio::spawn(log_host_events(store.subscribe()));

    // Integration
    let mut integration = DeebotIntegration::new(Hub::new(bots.clone()), Arc::clone(&store));
    integration.setup().await?;
    tracing::info!(
        integration = integration.name(),
        bots = bots.len(),
        entities = store.len(),
        "integration ready"
    );

    if config.virtual_bots.seed_state {
        for bot in &bots {
            bot.seed_state();
        }
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    integration.teardown().await?;
    watcher.abort();
    Ok(())
}

async fn log_host_events(mut events: broadcast::Receiver<HostEvent>) {
    loop {
        match events.recv().await {
            Ok(HostEvent::Added(entity)) => {
                tracing::info!(entity_id = %entity.entity_id, "entity added");
            }
            Ok(HostEvent::Updated(entity)) => {
                tracing::info!(entity_id = %entity.entity_id, state = %entity.state, "state changed");
            }
            Ok(HostEvent::Removed(id)) => tracing::info!(%id, "entity removed"),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "host event watcher lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
