//! `Alexa` / `ReportState`: report the live state of one light.

use serde_json::{Value, json};
use skillhub_domain::color::from_device_color;
use skillhub_domain::directive::Directive;
use skillhub_domain::error::SkillError;
use skillhub_domain::response::ResponseBuilder;

use crate::ports::{Authority, DeviceGateway};
use crate::routes::namespace;

/// Query the device service and report connectivity, power, and colour.
///
/// Power and colour are only reported when the device service knows them.
///
/// # Errors
///
/// Returns a directive error when the endpoint id or token is missing,
/// [`SkillError::Unauthorized`] when the token is rejected,
/// [`SkillError::Unreachable`] when the device service fails, and
/// [`SkillError::NoSuchEndpoint`] when it does not list the endpoint.
#[tracing::instrument(skip_all)]
pub async fn report_state<G, A>(
    gateway: &G,
    authority: &A,
    directive: &Directive,
) -> Result<ResponseBuilder, SkillError>
where
    G: DeviceGateway + Sync,
    A: Authority + Sync,
{
    let endpoint_id = directive.endpoint_id()?;
    let token = directive.bearer_token()?;
    authority.verify_token(token).await?;

    let device = gateway
        .list_devices(token)
        .await
        .map_err(super::unreachable)?
        .into_iter()
        .find(|device| &device.id == endpoint_id)
        .ok_or_else(|| SkillError::NoSuchEndpoint(endpoint_id.to_string()))?;

    let mut report = ResponseBuilder::new(namespace::ALEXA, "StateReport")
        .with_endpoint(endpoint_id.clone(), Some(token.to_string()))
        .with_correlation_token(directive.correlation_token().map(str::to_string));

    report.add_context_property(
        namespace::ENDPOINT_HEALTH,
        "connectivity",
        json!({ "value": device.state.connectivity.as_str() }),
    );
    if let Some(power) = device.state.power {
        report.add_context_property(namespace::POWER_CONTROLLER, "powerState", power.as_str());
    }
    if let Some(color) = device.state.color {
        report.add_context_property(
            namespace::COLOR_CONTROLLER,
            "color",
            Value::from(from_device_color(color)),
        );
    }
    Ok(report)
}
