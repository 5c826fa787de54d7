//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the integration and the
//! adapters behind each port can depend on them without creating circular
//! dependencies.

pub mod bot;
pub mod host;
pub mod integration;

pub use bot::Bot;
pub use host::EntityHost;
pub use integration::Integration;
