//! In-memory test doubles for the bot and host ports.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use vachub_app::event_bus::{BotEventBus, Subscription};
use vachub_app::ports::{Bot, EntityHost};
use vachub_domain::command::Command;
use vachub_domain::device::{DeviceFamily, DeviceInfo};
use vachub_domain::entity::Entity;
use vachub_domain::error::{DuplicateError, VacHubError};
use vachub_domain::event::{Event, EventKind};
use vachub_domain::id::EntityId;

use crate::entity::SharedHost;

/// Bot whose events are published by the test and whose commands are recorded.
pub struct FakeBot {
    info: DeviceInfo,
    bus: BotEventBus,
    commands: Mutex<Vec<Command>>,
    refreshes: Mutex<Vec<EventKind>>,
    fail: AtomicBool,
}

impl FakeBot {
    pub fn new(serial: &str, family: DeviceFamily) -> Arc<Self> {
        Arc::new(Self {
            info: DeviceInfo::builder()
                .serial(serial)
                .family(family)
                .build()
                .unwrap(),
            bus: BotEventBus::new(),
            commands: Mutex::new(Vec::new()),
            refreshes: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        })
    }

    pub fn vacuum(serial: &str) -> Arc<Self> {
        Self::new(serial, DeviceFamily::Vacuum)
    }

    pub fn mower(serial: &str) -> Arc<Self> {
        Self::new(serial, DeviceFamily::Mower)
    }

    pub fn publish(&self, event: impl Into<Event>) -> usize {
        self.bus.publish(&event.into())
    }

    pub fn bus(&self) -> &BotEventBus {
        &self.bus
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().clone()
    }

    pub fn refreshes(&self) -> Vec<EventKind> {
        self.refreshes.lock().clone()
    }

    pub fn fail_commands(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl Bot for FakeBot {
    fn device_info(&self) -> &DeviceInfo {
        &self.info
    }

    fn subscribe<F>(&self, kind: EventKind, callback: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.bus.subscribe(kind, callback)
    }

    fn execute_command(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<(), VacHubError>> + Send {
        let result = if self.fail.load(Ordering::SeqCst) {
            Err(VacHubError::client(std::io::Error::other("bot offline")))
        } else {
            self.commands.lock().push(command);
            Ok(())
        };
        async move { result }
    }

    fn request_refresh(&self, kind: EventKind) {
        self.refreshes.lock().push(kind);
    }
}

/// Host that records every call it receives.
#[derive(Default)]
pub struct RecordingHost {
    added: Mutex<Vec<Entity>>,
    writes: Mutex<Vec<Entity>>,
    removed: Mutex<Vec<EntityId>>,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn shared(self: &Arc<Self>) -> SharedHost {
        Arc::clone(self) as SharedHost
    }

    pub fn added(&self) -> Vec<Entity> {
        self.added.lock().clone()
    }

    pub fn writes_for(&self, id: EntityId) -> Vec<Entity> {
        self.writes
            .lock()
            .iter()
            .filter(|entity| entity.id == id)
            .cloned()
            .collect()
    }

    pub fn removed(&self) -> Vec<EntityId> {
        self.removed.lock().clone()
    }
}

impl EntityHost for RecordingHost {
    fn add_entity(&self, entity: Entity) -> Result<(), VacHubError> {
        let mut added = self.added.lock();
        if added.iter().any(|known| known.unique_id == entity.unique_id) {
            return Err(DuplicateError {
                unique_id: entity.unique_id,
            }
            .into());
        }
        added.push(entity);
        Ok(())
    }

    fn write_state(&self, entity: Entity) {
        self.writes.lock().push(entity);
    }

    fn remove_entity(&self, id: EntityId) {
        self.removed.lock().push(id);
    }
}
