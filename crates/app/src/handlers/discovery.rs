//! `Alexa.Discovery` / `Discover`: describe every light the user owns.

use skillhub_domain::capability::{CapabilityDescriptor, EndpointDescriptor};
use skillhub_domain::device::Device;
use skillhub_domain::directive::Directive;
use skillhub_domain::error::SkillError;
use skillhub_domain::response::{DISCOVER_RESPONSE, ResponseBuilder};

use crate::ports::{Authority, DeviceGateway};
use crate::routes::namespace;

/// List the devices behind the token and describe each as a colour light.
///
/// # Errors
///
/// Returns a directive error when `payload.scope.token` is missing,
/// [`SkillError::Unauthorized`] when the token is rejected, and
/// [`SkillError::Unreachable`] when the device service fails.
#[tracing::instrument(skip_all)]
pub async fn discover<G, A>(
    gateway: &G,
    authority: &A,
    directive: &Directive,
) -> Result<ResponseBuilder, SkillError>
where
    G: DeviceGateway + Sync,
    A: Authority + Sync,
{
    let token = directive.payload_str("payload.scope.token")?;
    authority.verify_token(token).await?;

    let devices = gateway
        .list_devices(token)
        .await
        .map_err(super::unreachable)?;
    tracing::info!(count = devices.len(), "discovered devices");

    let mut response = ResponseBuilder::new(namespace::DISCOVERY, DISCOVER_RESPONSE);
    for device in &devices {
        response.add_payload_endpoint(light_endpoint(device));
    }
    Ok(response)
}

/// Capabilities declared for every light, in declaration order.
#[must_use]
pub fn light_capabilities() -> [CapabilityDescriptor; 4] {
    [
        CapabilityDescriptor::alexa(),
        CapabilityDescriptor::interface(namespace::POWER_CONTROLLER)
            .supported(["powerState"])
            .retrievable(true),
        CapabilityDescriptor::interface(namespace::COLOR_CONTROLLER)
            .supported(["color"])
            .retrievable(true),
        CapabilityDescriptor::interface(namespace::ENDPOINT_HEALTH)
            .supported(["connectivity"])
            .retrievable(true),
    ]
}

fn light_endpoint(device: &Device) -> EndpointDescriptor {
    EndpointDescriptor::builder(device.id.clone(), device.name.clone())
        .capabilities(light_capabilities())
        .build()
}
