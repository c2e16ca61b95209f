//! # skillhub-domain
//!
//! Pure domain model for the skillhub smart-home skill backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Directives** (inbound requests from the voice platform) and
//!   their shape validation
//! - Define **Response envelopes** and the builder that assembles them
//!   (context properties, discovered endpoints, capability descriptors)
//! - Define **Devices** as reported by the downstream device service, and the
//!   **state changes** that can be pushed to it
//! - Provide the **colour codec** between protocol HSB and packed RGB integers
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod capability;
pub mod color;
pub mod device;
pub mod directive;
pub mod response;
