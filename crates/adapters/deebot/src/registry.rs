//! Entities registered by one integration instance, keyed by id and unique id.

use std::collections::HashMap;
use std::sync::Arc;

use vachub_app::ports::Bot;
use vachub_domain::entity::Entity;
use vachub_domain::error::VacHubError;
use vachub_domain::id::EntityId;

use crate::entity::{DeebotEntity, EntitySpec, SharedHost};

pub struct EntityRegistry<B> {
    host: SharedHost,
    entities: HashMap<EntityId, Arc<DeebotEntity<B>>>,
    by_unique_id: HashMap<String, EntityId>,
}

impl<B: Bot> EntityRegistry<B> {
    pub fn new(host: SharedHost) -> Self {
        Self {
            host,
            entities: HashMap::new(),
            by_unique_id: HashMap::new(),
        }
    }

    /// Build, register and mount the entities of `bot` described by `specs`.
    ///
    /// Specs whose `(serial, key)` pair is already registered are skipped.
    /// Returns how many entities were added.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while building a snapshot or adding it
    /// to the host. Entities added before the failure stay registered.
    pub fn add_entities(
        &mut self,
        bot: &Arc<B>,
        specs: Vec<EntitySpec>,
    ) -> Result<usize, VacHubError> {
        let serial = bot.device_info().serial.clone();
        let mut added = 0;
        for spec in specs {
            let unique_id = format!("{serial}_{}", spec.key());
            if self.by_unique_id.contains_key(&unique_id) {
                tracing::debug!(%unique_id, "entity already registered, skipping");
                continue;
            }

            let entity = DeebotEntity::from_spec(Arc::clone(bot), Arc::clone(&self.host), spec)?;
            match self.host.add_entity(entity.snapshot()) {
                Ok(()) => {}
                Err(VacHubError::Duplicate(err)) => {
                    tracing::debug!(unique_id = %err.unique_id, "host already knows entity, skipping");
                    continue;
                }
                Err(err) => return Err(err),
            }
            entity.mount();

            let id = entity.id();
            self.by_unique_id.insert(unique_id, id);
            self.entities.insert(id, Arc::new(entity));
            added += 1;
        }
        Ok(added)
    }

    pub fn get(&self, id: EntityId) -> Option<Arc<DeebotEntity<B>>> {
        self.entities.get(&id).cloned()
    }

    pub fn get_by_unique_id(&self, unique_id: &str) -> Option<Arc<DeebotEntity<B>>> {
        self.by_unique_id
            .get(unique_id)
            .and_then(|id| self.entities.get(id))
            .cloned()
    }

    /// Snapshots of every entity, sorted by unique id.
    pub fn snapshots(&self) -> Vec<Entity> {
        let mut snapshots: Vec<Entity> = self.entities.values().map(|e| e.snapshot()).collect();
        snapshots.sort_by(|a, b| a.unique_id.cmp(&b.unique_id));
        snapshots
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Unmount every entity and remove it from the host.
    pub fn remove_all(&mut self) -> usize {
        self.by_unique_id.clear();
        let count = self.entities.len();
        for (id, entity) in self.entities.drain() {
            entity.unmount();
            self.host.remove_entity(id);
        }
        count
    }
}
