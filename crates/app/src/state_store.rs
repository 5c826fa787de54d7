//! In-memory host: keeps the latest snapshot of every registered entity and
//! broadcasts changes over a tokio [`broadcast`] channel.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use vachub_domain::entity::Entity;
use vachub_domain::error::{DuplicateError, VacHubError};
use vachub_domain::id::EntityId;

use crate::ports::EntityHost;

/// Change notification emitted by [`InMemoryStateStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Added(Entity),
    Updated(Entity),
    Removed(EntityId),
}

#[derive(Default)]
struct Tables {
    by_id: HashMap<EntityId, Entity>,
    by_unique_id: HashMap<String, EntityId>,
}

/// [`EntityHost`] that keeps everything in memory.
///
/// Broadcasting succeeds even when there are no active subscribers (the
/// notification is simply dropped).
pub struct InMemoryStateStore {
    tables: RwLock<Tables>,
    sender: broadcast::Sender<HostEvent>,
}

impl InMemoryStateStore {
    /// Create a store whose change channel holds up to `capacity` pending
    /// notifications per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            tables: RwLock::new(Tables::default()),
            sender,
        }
    }

    /// Receive every change made *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<Entity> {
        self.tables.read().by_id.get(&id).cloned()
    }

    #[must_use]
    pub fn get_by_unique_id(&self, unique_id: &str) -> Option<Entity> {
        let tables = self.tables.read();
        tables
            .by_unique_id
            .get(unique_id)
            .and_then(|id| tables.by_id.get(id))
            .cloned()
    }

    /// All entities, sorted by unique id.
    #[must_use]
    pub fn list(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.tables.read().by_id.values().cloned().collect();
        entities.sort_by(|a, b| a.unique_id.cmp(&b.unique_id));
        entities
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.read().by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn notify(&self, event: HostEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EntityHost for InMemoryStateStore {
    fn add_entity(&self, entity: Entity) -> Result<(), VacHubError> {
        entity.validate()?;
        {
            let mut tables = self.tables.write();
            if tables.by_unique_id.contains_key(&entity.unique_id) {
                return Err(DuplicateError {
                    unique_id: entity.unique_id,
                }
                .into());
            }
            tables
                .by_unique_id
                .insert(entity.unique_id.clone(), entity.id);
            tables.by_id.insert(entity.id, entity.clone());
        }
        tracing::debug!(entity_id = %entity.entity_id, "entity added");
        self.notify(HostEvent::Added(entity));
        Ok(())
    }

    fn write_state(&self, entity: Entity) {
        {
            let mut tables = self.tables.write();
            let Some(slot) = tables.by_id.get_mut(&entity.id) else {
                tracing::debug!(entity_id = %entity.entity_id, "ignoring state of unknown entity");
                return;
            };
            *slot = entity.clone();
        }
        self.notify(HostEvent::Updated(entity));
    }

    fn remove_entity(&self, id: EntityId) {
        let removed = {
            let mut tables = self.tables.write();
            let removed = tables.by_id.remove(&id);
            if let Some(entity) = &removed {
                tables.by_unique_id.remove(&entity.unique_id);
            }
            removed
        };
        if let Some(entity) = removed {
            tracing::debug!(entity_id = %entity.entity_id, "entity removed");
            self.notify(HostEvent::Removed(id));
        }
    }
}
