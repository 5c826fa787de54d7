//! # vachub-adapter-virtual
//!
//! Simulated Deebot bots for testing and demonstration purposes.
//!
//! A [`VirtualBot`] implements the device-client port entirely in memory:
//!
//! | Operation | Behaviour |
//! |-----------|-----------|
//! | `execute_command` | Records the command, then publishes the event a real bot would confirm it with |
//! | `request_refresh` | Re-publishes the last events of that kind |
//! | [`seed_state`](VirtualBot::seed_state) | Publishes a plausible initial state for the bot's family |
//!
//! Commands are rejected while the bot is unavailable.
//!
//! ## Dependency rule
//!
//! Depends on `vachub-app` (port traits) and `vachub-domain` only.

mod seed;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use vachub_app::event_bus::{BotEventBus, Subscription};
use vachub_app::ports::Bot;
use vachub_domain::command::Command;
use vachub_domain::device::DeviceInfo;
use vachub_domain::error::VacHubError;
use vachub_domain::event::{
    AvailabilityEvent, CleanCountEvent, CutDirectionEvent, EnableEvent, Event, EventKind,
    ObstacleHeightEvent, VolumeEvent,
};

pub use seed::{SEED_UWB_CELL, seed_events};

/// Command rejected by a simulated bot.
#[derive(Debug, thiserror::Error)]
pub enum VirtualBotError {
    #[error("bot {serial} is unavailable")]
    Unavailable { serial: String },
}

/// Identifies one cached event: its kind plus the component (and cell) it
/// reports on, so life spans of different parts do not overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Slot {
    kind: EventKind,
    part: Option<String>,
}

impl Slot {
    fn of(event: &Event) -> Self {
        let part = match event {
            Event::LifeSpan(life_span) => Some(life_span.component.as_str().to_string()),
            Event::GoatLifeSpan(life_span) => Some(match &life_span.serial {
                Some(serial) => format!("{}:{serial}", life_span.component.as_str()),
                None => life_span.component.as_str().to_string(),
            }),
            Event::NewUwbCell(cell) => Some(cell.serial.clone()),
            _ => None,
        };
        Self {
            kind: event.kind(),
            part,
        }
    }
}

/// An in-memory bot.
pub struct VirtualBot {
    info: DeviceInfo,
    bus: BotEventBus,
    available: AtomicBool,
    last: Mutex<HashMap<Slot, Event>>,
    commands: Mutex<Vec<Command>>,
}

impl VirtualBot {
    /// Create a bot that has published nothing yet.
    #[must_use]
    pub fn new(info: DeviceInfo) -> Self {
        Self {
            info,
            bus: BotEventBus::new(),
            available: AtomicBool::new(true),
            last: Mutex::new(HashMap::new()),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Publish `event` to subscribers and remember it for refreshes.
    ///
    /// Returns the number of callbacks that received it.
    pub fn publish(&self, event: impl Into<Event>) -> usize {
        let event = event.into();
        if let Event::Availability(availability) = &event {
            self.available
                .store(availability.available, Ordering::SeqCst);
        }
        self.last.lock().insert(Slot::of(&event), event.clone());
        self.bus.publish(&event)
    }

    /// Publish the initial state of a freshly connected bot of this family.
    pub fn seed_state(&self) {
        let events = seed_events(self.info.family);
        tracing::debug!(serial = %self.info.serial, events = events.len(), "seeding virtual bot");
        for event in events {
            self.publish(event);
        }
    }

    pub fn set_available(&self, available: bool) {
        self.publish(AvailabilityEvent { available });
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Commands accepted so far, oldest first.
    pub fn executed_commands(&self) -> Vec<Command> {
        self.commands.lock().clone()
    }

    pub fn bus(&self) -> &BotEventBus {
        &self.bus
    }

    fn confirmation(&self, command: &Command) -> Event {
        match *command {
            Command::SetEnable { setting, enable } => EnableEvent { setting, enable }.into(),
            Command::SetVolume { volume } => VolumeEvent {
                volume,
                maximum: self.volume_maximum(),
            }
            .into(),
            Command::SetCleanCount { count } => CleanCountEvent { count }.into(),
            Command::SetCutDirection { angle } => CutDirectionEvent { angle }.into(),
            Command::SetObstacleHeight { level } => ObstacleHeightEvent { level }.into(),
        }
    }

    fn volume_maximum(&self) -> Option<u8> {
        let slot = Slot {
            kind: EventKind::Volume,
            part: None,
        };
        match self.last.lock().get(&slot) {
            Some(Event::Volume(volume)) => volume.maximum,
            _ => None,
        }
    }
}

impl Bot for VirtualBot {
    fn device_info(&self) -> &DeviceInfo {
        &self.info
    }

    fn subscribe<F>(&self, kind: EventKind, callback: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.bus.subscribe(kind, callback)
    }

    async fn execute_command(&self, command: Command) -> Result<(), VacHubError> {
        if !self.is_available() {
            return Err(VacHubError::client(VirtualBotError::Unavailable {
                serial: self.info.serial.clone(),
            }));
        }
        tracing::debug!(serial = %self.info.serial, %command, "virtual bot executing command");
        let confirmation = self.confirmation(&command);
        self.commands.lock().push(command);
        self.publish(confirmation);
        Ok(())
    }

    fn request_refresh(&self, kind: EventKind) {
        let cached: Vec<Event> = self
            .last
            .lock()
            .iter()
            .filter(|(slot, _)| slot.kind == kind)
            .map(|(_, event)| event.clone())
            .collect();
        if cached.is_empty() {
            tracing::debug!(serial = %self.info.serial, %kind, "nothing to refresh");
            return;
        }
        for event in &cached {
            self.bus.publish(event);
        }
    }
}
