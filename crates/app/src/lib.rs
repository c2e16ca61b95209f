//! # skillhub-app
//!
//! Application layer: the directive router and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceGateway`: list devices and push state changes to the device service
//!   - `Authority`: accept authorization grants and vet bearer tokens
//! - Define the **driving/inbound port**: `DirectiveRouter::handle`, which turns
//!   a raw request into a response envelope
//! - Keep the `(namespace, name)` dispatch table and one handler per directive
//! - Provide the default, permissive `AcceptAll` authority
//!
//! ## Dependency rule
//! Depends on `skillhub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod authority;
pub mod handlers;
pub mod ports;
pub mod router;
pub mod routes;

#[cfg(test)]
mod stubs;
