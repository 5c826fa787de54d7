//! # vachub-adapter-deebot
//!
//! Exposes Deebot vacuums and mowers as host entities.
//!
//! ## Entities
//!
//! | Platform | Shared | Vacuum | Mower |
//! |----------|--------|--------|-------|
//! | Sensor | last error, battery | life spans, last cleaning, stats | life spans, protect state, wifi, UWB cells |
//! | Switch | | advanced mode, continuous cleaning, carpet boost, clean preference, true detect | animal/rain/theft protection, border cut, AI recognition, child lock, warnings |
//! | Number | volume | clean count | cut direction, obstacle height |
//!
//! Which catalog applies is decided per bot, from that bot's own family.
//! UWB cell sensors are registered lazily, when the mower reports a new cell.
//!
//! ## Dependency rule
//!
//! Depends on `vachub-app` (port traits) and `vachub-domain` only.

pub mod entity;
pub mod error;
pub mod number;
pub mod registry;
pub mod sensor;
pub mod services;
pub mod switch;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use vachub_app::event_bus::Subscription;
use vachub_app::hub::Hub;
use vachub_app::ports::{Bot, EntityHost, Integration};
use vachub_domain::device::DeviceFamily;
use vachub_domain::entity::Entity;
use vachub_domain::error::VacHubError;
use vachub_domain::event::{Event, EventKind};
use vachub_domain::id::EntityId;

pub use entity::{DeebotEntity, EntitySpec, SharedHost};
pub use error::DeebotError;
pub use registry::EntityRegistry;
pub use services::ServiceCall;

/// Every entity a bot of `family` starts with.
pub fn catalog(family: DeviceFamily) -> Vec<EntitySpec> {
    let mut specs: Vec<EntitySpec> = sensor::catalog(family).into_iter().map(Into::into).collect();
    specs.extend(switch::catalog(family).into_iter().map(Into::into));
    specs.extend(number::catalog(family).into_iter().map(Into::into));
    specs
}

/// The Deebot integration.
pub struct DeebotIntegration<B> {
    hub: Hub<B>,
    registry: Arc<Mutex<EntityRegistry<B>>>,
    discovery: Vec<Subscription>,
}

impl<B: Bot> DeebotIntegration<B> {
    /// Create the integration for the bots of `hub`, publishing into `host`.
    pub fn new<H: EntityHost>(hub: Hub<B>, host: Arc<H>) -> Self {
        let host: SharedHost = host;
        Self {
            hub,
            registry: Arc::new(Mutex::new(EntityRegistry::new(host))),
            discovery: Vec::new(),
        }
    }

    pub fn hub(&self) -> &Hub<B> {
        &self.hub
    }

    pub fn entity_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Snapshots of every registered entity, sorted by unique id.
    pub fn entities(&self) -> Vec<Entity> {
        self.registry.lock().snapshots()
    }

    /// Id of the entity registered under `unique_id` (`{serial}_{key}`).
    pub fn entity_id(&self, unique_id: &str) -> Option<EntityId> {
        self.registry
            .lock()
            .get_by_unique_id(unique_id)
            .map(|entity| entity.id())
    }

    fn watch_uwb_cells(registry: &Arc<Mutex<EntityRegistry<B>>>, bot: &Arc<B>) -> Subscription {
        let registry: Weak<Mutex<EntityRegistry<B>>> = Arc::downgrade(registry);
        let weak_bot = Arc::downgrade(bot);
        bot.subscribe(EventKind::NewUwbCell, move |event| {
            let Event::NewUwbCell(cell) = event else {
                return;
            };
            let (Some(registry), Some(bot)) = (registry.upgrade(), weak_bot.upgrade()) else {
                return;
            };
            let spec: EntitySpec = sensor::uwb_cell(&cell.serial).into();
            match registry.lock().add_entities(&bot, vec![spec]) {
                Ok(0) => tracing::debug!(cell = %cell.serial, "uwb cell already registered"),
                Ok(_) => tracing::info!(cell = %cell.serial, "registered uwb cell sensor"),
                Err(err) => {
                    tracing::warn!(cell = %cell.serial, error = %err, "failed to register uwb cell sensor");
                }
            }
        })
    }
}

impl<B: Bot> Integration for DeebotIntegration<B> {
    fn name(&self) -> &'static str {
        "deebot"
    }

    #[tracing::instrument(skip(self), fields(bots = self.hub.len()))]
    async fn setup(&mut self) -> Result<(), VacHubError> {
        self.discovery.clear();
        for bot in self.hub.bots() {
            let info = bot.device_info();
            let added = self.registry.lock().add_entities(bot, catalog(info.family))?;
            tracing::info!(serial = %info.serial, family = %info.family, added, "registered entities");
            let subscription = Self::watch_uwb_cells(&self.registry, bot);
            self.discovery.push(subscription);
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, data))]
    async fn handle_service_call(
        &self,
        entity_id: EntityId,
        service: &str,
        data: serde_json::Value,
    ) -> Result<(), VacHubError> {
        let entity = self
            .registry
            .lock()
            .get(entity_id)
            .ok_or(DeebotError::UnknownEntity(entity_id))?;
        let call = ServiceCall::parse(service, data)?;
        entity.call_service(call).await
    }

    #[tracing::instrument(skip(self))]
    async fn teardown(&mut self) -> Result<(), VacHubError> {
        self.discovery.clear();
        let removed = self.registry.lock().remove_all();
        tracing::info!(removed, "unloaded entities");
        Ok(())
    }
}
