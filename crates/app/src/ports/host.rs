//! Host-framework port: where entity snapshots are registered and published.

use std::sync::Arc;

use vachub_domain::entity::Entity;
use vachub_domain::error::VacHubError;
use vachub_domain::id::EntityId;

/// The home-automation host as seen by an integration.
///
/// Methods are synchronous and must not block: they are called from inside
/// event callbacks.
pub trait EntityHost: Send + Sync + 'static {
    /// Register a new entity with its initial snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`VacHubError::Duplicate`] when an entity with the same unique
    /// id is already registered.
    fn add_entity(&self, entity: Entity) -> Result<(), VacHubError>;

    /// Publish the latest snapshot of a registered entity.
    fn write_state(&self, entity: Entity);

    /// Forget an entity; later `write_state` calls for it are dropped.
    fn remove_entity(&self, id: EntityId);
}

impl<T: EntityHost> EntityHost for Arc<T> {
    fn add_entity(&self, entity: Entity) -> Result<(), VacHubError> {
        (**self).add_entity(entity)
    }

    fn write_state(&self, entity: Entity) {
        (**self).write_state(entity);
    }

    fn remove_entity(&self, id: EntityId) {
        (**self).remove_entity(id);
    }
}
