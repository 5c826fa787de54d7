//! Per-kind callback bus for bot events.
//!
//! Every [`EventKind`] has its own channel of callbacks. Subscribing returns a
//! [`Subscription`] guard; the callback stays registered exactly as long as
//! the guard lives.
//!
//! - [`SubscriptionId`] - Unique identifier of one registration
//! - [`Subscription`] - Scoped registration, unsubscribes on drop
//! - [`BotEventBus`] - Registry storing and dispatching callbacks

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use vachub_domain::event::{Event, EventKind};

/// Unique identifier for a subscription, stable for the bus lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type Callback = Arc<dyn Fn(&Event) + Send + Sync>;

struct Entry {
    /// Cleared on unsubscribe, so a dispatch already in flight skips it.
    active: AtomicBool,
    callback: Callback,
}

#[derive(Default)]
struct Channels {
    next_id: AtomicU64,
    by_kind: RwLock<HashMap<EventKind, BTreeMap<SubscriptionId, Arc<Entry>>>>,
}

impl Channels {
    fn remove(&self, kind: EventKind, id: SubscriptionId) -> bool {
        let mut by_kind = self.by_kind.write();
        let Some(channel) = by_kind.get_mut(&kind) else {
            return false;
        };
        let removed = channel.remove(&id);
        if channel.is_empty() {
            by_kind.remove(&kind);
        }
        match removed {
            Some(entry) => {
                entry.active.store(false, Ordering::Release);
                true
            }
            None => false,
        }
    }
}

/// Scoped registration of one callback on one [`EventKind`].
///
/// Dropping the guard unsubscribes; once dropped, the callback is never
/// invoked again, even by a dispatch that is already running.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    channels: Weak<Channels>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Explicitly release the registration.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(channels) = self.channels.upgrade() {
            channels.remove(self.kind, self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Callback registry with one channel per [`EventKind`].
///
/// Cloning is cheap and yields a handle to the same registry.
#[derive(Clone, Default)]
pub struct BotEventBus {
    channels: Arc<Channels>,
}

impl BotEventBus {
    /// Creates a new bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for events of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, callback: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.channels.next_id.fetch_add(1, Ordering::Relaxed));
        let entry = Arc::new(Entry {
            active: AtomicBool::new(true),
            callback: Arc::new(callback),
        });
        self.channels
            .by_kind
            .write()
            .entry(kind)
            .or_default()
            .insert(id, entry);
        tracing::trace!(subscription = %id, %kind, "subscribed");

        Subscription {
            id,
            kind,
            channels: Arc::downgrade(&self.channels),
        }
    }

    /// Delivers `event` to every callback registered for its kind, in
    /// subscription order.
    ///
    /// The channel is snapshotted before any callback runs, so callbacks may
    /// themselves subscribe or unsubscribe. Returns the number of callbacks
    /// invoked.
    pub fn publish(&self, event: &Event) -> usize {
        let kind = event.kind();
        let entries: Vec<Arc<Entry>> = match self.channels.by_kind.read().get(&kind) {
            Some(channel) => channel.values().cloned().collect(),
            None => return 0,
        };

        let mut delivered = 0;
        for entry in entries {
            if entry.active.load(Ordering::Acquire) {
                (entry.callback)(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Returns the number of callbacks registered for `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.channels
            .by_kind
            .read()
            .get(&kind)
            .map_or(0, BTreeMap::len)
    }

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.channels.by_kind.read().values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl fmt::Debug for BotEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotEventBus")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
