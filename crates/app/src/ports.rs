//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the router and the adapter
//! layer can depend on them without creating circular dependencies.

pub mod authority;
pub mod device_gateway;

pub use authority::Authority;
pub use device_gateway::DeviceGateway;
