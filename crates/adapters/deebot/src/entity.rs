//! Entity plumbing shared by every platform.
//!
//! [`BotEntity`] is the composed base: a bot handle, the cached [`Entity`]
//! snapshot and the subscriptions the entity owns while mounted. Platform
//! entities wrap it and only add their own event handling and write path.

use std::sync::Arc;

use parking_lot::Mutex;

use vachub_app::event_bus::Subscription;
use vachub_app::ports::{Bot, EntityHost};
use vachub_domain::entity::{Entity, EntityBuilder, EntityDescription, Platform};
use vachub_domain::error::{UnsupportedServiceError, VacHubError};
use vachub_domain::event::{Event, EventKind};
use vachub_domain::id::EntityId;
use vachub_domain::time::now;

use crate::number::{NumberDescription, NumberEntity};
use crate::sensor::{SensorDescription, SensorEntity};
use crate::services::ServiceCall;
use crate::switch::{SwitchDescription, SwitchEntity};

/// Host handle shared by all entities of an integration instance.
pub type SharedHost = Arc<dyn EntityHost>;

/// Start a snapshot for an entity of `bot` on `platform`.
pub(crate) fn snapshot_builder<B: Bot>(
    bot: &B,
    platform: Platform,
    description: EntityDescription,
) -> EntityBuilder {
    Entity::builder()
        .platform(platform)
        .device_serial(bot.device_info().serial.clone())
        .description(description)
}

/// Composed entity base.
///
/// The snapshot is only mutated from this entity's own callbacks. The host is
/// always called after the snapshot lock has been released.
pub struct BotEntity<B> {
    bot: Arc<B>,
    host: SharedHost,
    id: EntityId,
    unique_id: String,
    snapshot: Arc<Mutex<Entity>>,
    always_available: bool,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl<B: Bot> BotEntity<B> {
    pub(crate) fn new(bot: Arc<B>, host: SharedHost, initial: Entity, always_available: bool) -> Self {
        Self {
            bot,
            host,
            id: initial.id,
            unique_id: initial.unique_id.clone(),
            snapshot: Arc::new(Mutex::new(initial)),
            always_available,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    pub fn bot(&self) -> &Arc<B> {
        &self.bot
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Clone of the cached snapshot.
    pub fn snapshot(&self) -> Entity {
        self.snapshot.lock().clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.lock().is_empty()
    }

    /// Subscribe to `kind` for as long as the entity stays mounted.
    ///
    /// `apply` mutates the cached snapshot; returning `true` publishes it to
    /// the host, `false` leaves the host untouched.
    pub(crate) fn listen<F>(&self, kind: EventKind, apply: F)
    where
        F: Fn(&Event, &mut Entity) -> bool + Send + Sync + 'static,
    {
        let snapshot = Arc::clone(&self.snapshot);
        let host = Arc::clone(&self.host);
        let subscription = self.bot.subscribe(kind, move |event| {
            let published = {
                let mut entity = snapshot.lock();
                if !apply(event, &mut entity) {
                    return;
                }
                entity.clone()
            };
            host.write_state(published);
        });
        self.subscriptions.lock().push(subscription);
    }

    /// Track bot availability unless the entity is always available.
    pub(crate) fn mount_availability(&self) {
        if self.always_available {
            return;
        }
        self.listen(EventKind::Availability, |event, entity| {
            let Event::Availability(availability) = event else {
                return false;
            };
            entity.available = availability.available;
            entity.touch(now());
            true
        });
    }

    /// Release every subscription. No callback of this entity fires afterwards.
    pub fn unmount(&self) {
        let subscriptions = std::mem::take(&mut *self.subscriptions.lock());
        drop(subscriptions);
    }
}

/// Declarative description of one entity to register.
#[derive(Debug, Clone)]
pub enum EntitySpec {
    Sensor(SensorDescription),
    Switch(SwitchDescription),
    Number(NumberDescription),
}

impl EntitySpec {
    pub fn key(&self) -> &str {
        match self {
            Self::Sensor(desc) => &desc.entity.key,
            Self::Switch(desc) => &desc.entity.key,
            Self::Number(desc) => &desc.entity.key,
        }
    }
}

impl From<SensorDescription> for EntitySpec {
    fn from(desc: SensorDescription) -> Self {
        Self::Sensor(desc)
    }
}

impl From<SwitchDescription> for EntitySpec {
    fn from(desc: SwitchDescription) -> Self {
        Self::Switch(desc)
    }
}

impl From<NumberDescription> for EntitySpec {
    fn from(desc: NumberDescription) -> Self {
        Self::Number(desc)
    }
}

/// Any entity the integration manages.
pub enum DeebotEntity<B> {
    Sensor(SensorEntity<B>),
    Switch(SwitchEntity<B>),
    Number(NumberEntity<B>),
}

impl<B: Bot> DeebotEntity<B> {
    /// Build the entity and its initial snapshot, without subscribing.
    ///
    /// # Errors
    ///
    /// Returns [`VacHubError::Validation`] if the snapshot is invalid (empty
    /// serial or key).
    pub fn from_spec(bot: Arc<B>, host: SharedHost, spec: EntitySpec) -> Result<Self, VacHubError> {
        Ok(match spec {
            EntitySpec::Sensor(desc) => Self::Sensor(SensorEntity::new(bot, host, desc)?),
            EntitySpec::Switch(desc) => Self::Switch(SwitchEntity::new(bot, host, desc)?),
            EntitySpec::Number(desc) => Self::Number(NumberEntity::new(bot, host, desc)?),
        })
    }

    pub fn base(&self) -> &BotEntity<B> {
        match self {
            Self::Sensor(entity) => entity.base(),
            Self::Switch(entity) => entity.base(),
            Self::Number(entity) => entity.base(),
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            Self::Sensor(_) => Platform::Sensor,
            Self::Switch(_) => Platform::Switch,
            Self::Number(_) => Platform::Number,
        }
    }

    pub fn id(&self) -> EntityId {
        self.base().id()
    }

    pub fn unique_id(&self) -> &str {
        self.base().unique_id()
    }

    pub fn snapshot(&self) -> Entity {
        self.base().snapshot()
    }

    /// Acquire every subscription the entity declares.
    pub fn mount(&self) {
        self.base().mount_availability();
        match self {
            Self::Sensor(entity) => entity.mount(),
            Self::Switch(entity) => entity.mount(),
            Self::Number(entity) => entity.mount(),
        }
    }

    pub fn unmount(&self) {
        self.base().unmount();
    }

    /// Run a host service call against this entity.
    ///
    /// # Errors
    ///
    /// Returns [`VacHubError::UnsupportedService`] when the platform does not
    /// implement the service, [`VacHubError::Validation`] for an out-of-range
    /// number, or the bot's error when the command cannot be submitted.
    pub async fn call_service(&self, call: ServiceCall) -> Result<(), VacHubError> {
        match (self, call) {
            (Self::Switch(switch), ServiceCall::TurnOn) => switch.turn_on().await,
            (Self::Switch(switch), ServiceCall::TurnOff) => switch.turn_off().await,
            (Self::Number(number), ServiceCall::SetValue(value)) => number.set_value(value).await,
            (_, ServiceCall::Refresh(kind)) => {
                tracing::debug!(entity = self.unique_id(), %kind, "requesting refresh");
                self.base().bot().request_refresh(kind);
                Ok(())
            }
            (_, call) => Err(UnsupportedServiceError {
                platform: self.platform().as_str(),
                service: call.name().to_string(),
            }
            .into()),
        }
    }
}
