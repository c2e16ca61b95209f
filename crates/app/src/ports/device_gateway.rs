//! Device gateway port: the remote service that knows and drives the lights.

use std::future::Future;
use std::sync::Arc;

use skillhub_domain::device::{Device, StateChange};
use skillhub_domain::error::SkillError;
use skillhub_domain::id::EndpointId;

/// Access to the downstream device-control service.
///
/// Every call carries the bearer token taken from the directive, forwarded
/// verbatim. Implementations report any transport, status, or decoding
/// failure as [`SkillError::Unreachable`]; they never retry.
pub trait DeviceGateway {
    /// List the devices visible to `token`, with their last known state.
    fn list_devices(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Vec<Device>, SkillError>> + Send;

    /// Push one state change to a device.
    fn set_state(
        &self,
        endpoint_id: &EndpointId,
        change: StateChange,
        token: &str,
    ) -> impl Future<Output = Result<(), SkillError>> + Send;
}

impl<T: DeviceGateway + Send + Sync> DeviceGateway for Arc<T> {
    fn list_devices(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Vec<Device>, SkillError>> + Send {
        (**self).list_devices(token)
    }

    fn set_state(
        &self,
        endpoint_id: &EndpointId,
        change: StateChange,
        token: &str,
    ) -> impl Future<Output = Result<(), SkillError>> + Send {
        (**self).set_state(endpoint_id, change, token)
    }
}
