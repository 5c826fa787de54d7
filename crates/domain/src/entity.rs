//! Entity: the host-visible record of one piece of bot state or control.
//!
//! An entity instance in the integration owns exactly one [`Entity`]
//! snapshot, mutates it from its own event subscriptions, and hands clones of
//! it to the host whenever it changes.

mod attribute_value;
mod description;
mod state;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use attribute_value::AttributeValue;
pub use description::{EntityCategory, EntityDescription, Platform, StateClass};
pub use state::EntityState;

use crate::error::{VacHubError, ValidationError};
use crate::id::EntityId;
use crate::time::{Timestamp, now};

/// Snapshot of an entity as published to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Stable identity: `{serial}_{key}`.
    pub unique_id: String,
    /// Host-facing identifier: `{platform}.{serial}_{key}`, lowercase.
    pub entity_id: String,
    pub platform: Platform,
    pub device_serial: String,
    pub key: String,
    pub translation_key: Option<String>,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub unit: Option<String>,
    pub device_class: Option<String>,
    pub state_class: Option<StateClass>,
    pub category: Option<EntityCategory>,
    pub enabled_by_default: bool,
    pub available: bool,
    pub state: EntityState,
    pub attributes: HashMap<String, AttributeValue>,
    pub last_changed: Timestamp,
    pub last_updated: Timestamp,
}

impl Entity {
    /// Create a builder for constructing an [`Entity`].
    #[must_use]
    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VacHubError::Validation`] when the serial or key is empty.
    pub fn validate(&self) -> Result<(), VacHubError> {
        if self.device_serial.is_empty() {
            return Err(ValidationError::EmptySerial.into());
        }
        if self.key.is_empty() {
            return Err(ValidationError::EmptyKey.into());
        }
        Ok(())
    }

    /// Replace the state, bumping `last_changed` only when it differs.
    pub fn update_state(&mut self, state: EntityState, at: Timestamp) {
        if self.state != state {
            self.state = state;
            self.last_changed = at;
        }
        self.last_updated = at;
    }

    /// Mark the snapshot as refreshed without touching the state.
    pub fn touch(&mut self, at: Timestamp) {
        self.last_updated = at;
    }

    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// The state the host should display, folding in availability.
    #[must_use]
    pub fn effective_state(&self) -> EntityState {
        if self.available {
            self.state.clone()
        } else {
            EntityState::Unavailable
        }
    }
}

/// Step-by-step builder for [`Entity`].
#[derive(Debug, Default)]
pub struct EntityBuilder {
    id: Option<EntityId>,
    platform: Option<Platform>,
    device_serial: Option<String>,
    description: Option<EntityDescription>,
    state: EntityState,
    attributes: HashMap<String, AttributeValue>,
    available: Option<bool>,
}

impl EntityBuilder {
    #[must_use]
    pub fn id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    #[must_use]
    pub fn device_serial(mut self, serial: impl Into<String>) -> Self {
        self.device_serial = Some(serial.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: EntityDescription) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub fn state(mut self, state: EntityState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Consume the builder, validate, and return an [`Entity`].
    ///
    /// # Errors
    ///
    /// Returns [`VacHubError::Validation`] if the platform or description is
    /// missing, or if the serial or key is empty.
    pub fn build(self) -> Result<Entity, VacHubError> {
        let platform = self
            .platform
            .ok_or(ValidationError::MissingField("platform"))?;
        let description = self
            .description
            .ok_or(ValidationError::MissingField("description"))?;
        let device_serial = self.device_serial.unwrap_or_default();
        let unique_id = format!("{device_serial}_{}", description.key);
        let entity_id = format!("{}.{}", platform.as_str(), unique_id.to_lowercase());
        let ts = now();

        let entity = Entity {
            id: self.id.unwrap_or_default(),
            unique_id,
            entity_id,
            platform,
            device_serial,
            key: description.key,
            translation_key: description.translation_key,
            name: description.name,
            icon: description.icon,
            unit: description.unit,
            device_class: description.device_class,
            state_class: description.state_class,
            category: description.category,
            enabled_by_default: description.enabled_by_default,
            available: self.available.unwrap_or(true),
            state: self.state,
            attributes: self.attributes,
            last_changed: ts,
            last_updated: ts,
        };
        entity.validate()?;
        Ok(entity)
    }
}
