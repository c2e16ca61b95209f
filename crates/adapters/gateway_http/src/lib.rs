//! # skillhub-adapter-gateway-http
//!
//! [`DeviceGateway`](skillhub_app::ports::DeviceGateway) backed by the remote
//! device-control service.
//!
//! ## Wire format
//!
//! | Call | Request |
//! |------|---------|
//! | list devices | `GET {base_url}/devices` |
//! | power | `GET {base_url}/set?topic={endpointId}/OnOff&payload=true\|false` |
//! | colour | `GET {base_url}/set?topic={endpointId}/Color&payload={packed RGB}` |
//!
//! Every request carries `Authorization: Bearer <token>` with the token taken
//! from the directive.
//!
//! ## Dependency rule
//!
//! Depends on `skillhub-app` (port traits) and `skillhub-domain` only.

mod client;
mod error;
mod wire;

pub use client::{DEFAULT_TIMEOUT, HttpDeviceGateway};
pub use error::GatewayError;
