//! Device-client port: one managed bot.
//!
//! The device client owns protocol, authentication and event decoding. The
//! integration sees a bot only through this trait: typed event subscriptions
//! in, typed commands out.

use std::future::Future;
use std::sync::Arc;

use vachub_domain::command::Command;
use vachub_domain::device::DeviceInfo;
use vachub_domain::error::VacHubError;
use vachub_domain::event::{Event, EventKind};

use crate::event_bus::Subscription;

/// A bot as exposed by the device-client collaborator.
pub trait Bot: Send + Sync + 'static {
    /// Static description of the unit, including its product family.
    fn device_info(&self) -> &DeviceInfo;

    /// Register `callback` for every event of `kind`.
    ///
    /// The callback stays registered for as long as the returned
    /// [`Subscription`] is alive; dropping it unsubscribes.
    fn subscribe<F>(&self, kind: EventKind, callback: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static;

    /// Submit a command to the bot.
    ///
    /// Resolves once the command has been accepted for transmission, not when
    /// the bot has applied it; the confirmed state arrives later as an event.
    fn execute_command(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<(), VacHubError>> + Send;

    /// Ask the bot to re-publish the current value of `kind`.
    fn request_refresh(&self, kind: EventKind);
}

impl<T: Bot> Bot for Arc<T> {
    fn device_info(&self) -> &DeviceInfo {
        (**self).device_info()
    }

    fn subscribe<F>(&self, kind: EventKind, callback: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        (**self).subscribe(kind, callback)
    }

    fn execute_command(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<(), VacHubError>> + Send {
        (**self).execute_command(command)
    }

    fn request_refresh(&self, kind: EventKind) {
        (**self).request_refresh(kind);
    }
}
