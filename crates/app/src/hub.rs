//! The set of bots managed by one integration instance.

use std::sync::Arc;

use crate::ports::Bot;

/// Bots handed to an integration at construction time.
pub struct Hub<B> {
    bots: Vec<Arc<B>>,
}

impl<B: Bot> Hub<B> {
    #[must_use]
    pub fn new(bots: Vec<Arc<B>>) -> Self {
        Self { bots }
    }

    #[must_use]
    pub fn bots(&self) -> &[Arc<B>] {
        &self.bots
    }

    /// Look a bot up by device serial.
    #[must_use]
    pub fn find(&self, serial: &str) -> Option<&Arc<B>> {
        self.bots
            .iter()
            .find(|bot| bot.device_info().serial == serial)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

impl<B> Clone for Hub<B> {
    fn clone(&self) -> Self {
        Self {
            bots: self.bots.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;

    use vachub_domain::command::Command;
    use vachub_domain::device::DeviceInfo;
    use vachub_domain::error::VacHubError;
    use vachub_domain::event::{Event, EventKind};

    use crate::event_bus::{BotEventBus, Subscription};

    struct StubBot {
        info: DeviceInfo,
        bus: BotEventBus,
    }

    impl StubBot {
        fn new(serial: &str) -> Arc<Self> {
            Arc::new(Self {
                info: DeviceInfo::builder().serial(serial).build().unwrap(),
                bus: BotEventBus::new(),
            })
        }
    }

    impl Bot for StubBot {
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
            _command: Command,
        ) -> impl Future<Output = Result<(), VacHubError>> + Send {
            async { Ok(()) }
        }

        fn request_refresh(&self, _kind: EventKind) {}
    }

    #[test]
    fn should_find_bot_by_serial() {
        let hub = Hub::new(vec![StubBot::new("E0001"), StubBot::new("E0002")]);

        assert_eq!(hub.len(), 2);
        assert_eq!(
            hub.find("E0002").map(|bot| bot.device_info().serial.as_str()),
            Some("E0002")
        );
        assert!(hub.find("E9999").is_none());
    }

    #[test]
    fn should_be_empty_without_bots() {
        let hub: Hub<StubBot> = Hub::new(Vec::new());
        assert!(hub.is_empty());
        assert!(hub.bots().is_empty());
    }
}
