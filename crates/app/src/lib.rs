//! # vachub-app
//!
//! Application layer with **port definitions** (traits) and the in-process
//! infrastructure that does not need IO.
//!
//! ## Responsibilities
//! - Define the **device-client port** [`Bot`](ports::Bot): subscribe to typed
//!   events, submit commands, request refreshes
//! - Define the **host-framework port** [`EntityHost`](ports::EntityHost):
//!   register entities and publish their state
//! - Define the **integration lifecycle port** [`Integration`](ports::Integration)
//! - Provide the per-kind callback bus ([`event_bus::BotEventBus`]) with
//!   scoped [`Subscription`](event_bus::Subscription)s
//! - Provide an in-memory host ([`state_store::InMemoryStateStore`])
//! - Hold the managed bots ([`hub::Hub`]), injected into integrations
//!
//! ## Dependency rule
//! Depends on `vachub-domain` only (plus `tokio::sync` and `parking_lot`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod hub;
pub mod ports;
pub mod state_store;
