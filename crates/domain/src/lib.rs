//! # vachub-domain
//!
//! Pure domain model for the vachub Deebot integration.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (the bots managed by the integration and their product family)
//! - Define **Entities** (host-visible snapshots: sensors, switches, numbers)
//!   and the static **descriptors** they are built from
//! - Define the device-client vocabulary: **Events** published by a bot and
//!   **Commands** submitted to it
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod command;
pub mod device;
pub mod entity;
pub mod event;
