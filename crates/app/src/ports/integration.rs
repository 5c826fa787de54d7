//! Integration port: lifecycle and service-call handling.
//!
//! An integration bridges a device-client library into the host. It builds
//! its entities on setup and handles service calls directed at entities it
//! owns.

use std::future::Future;

use vachub_domain::error::VacHubError;
use vachub_domain::id::EntityId;

/// A pluggable device integration.
///
/// Dependencies (the hub of bots, the host) are injected at construction.
/// The binary crate calls the lifecycle methods in order:
///
/// 1. [`setup`](Self::setup): build, register and mount entities
/// 2. (the host runs, forwarding service calls via [`handle_service_call`](Self::handle_service_call))
/// 3. [`teardown`](Self::teardown): release every subscription
pub trait Integration {
    /// Unique name identifying this integration (e.g. `"deebot"`).
    fn name(&self) -> &'static str;

    /// Register every entity the managed bots expose.
    fn setup(&mut self) -> impl Future<Output = Result<(), VacHubError>> + Send;

    /// Handle a service call (e.g. `turn_on`, `set_value`, `refresh`) for an
    /// entity owned by this integration.
    fn handle_service_call(
        &self,
        entity_id: EntityId,
        service: &str,
        data: serde_json::Value,
    ) -> impl Future<Output = Result<(), VacHubError>> + Send;

    /// Called on unload. No callback may fire once this returns.
    fn teardown(&mut self) -> impl Future<Output = Result<(), VacHubError>> + Send;
}
