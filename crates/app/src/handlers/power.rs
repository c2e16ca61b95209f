//! `Alexa.PowerController` / `TurnOn` and `TurnOff`.

use skillhub_domain::device::{PowerState, StateChange};
use skillhub_domain::directive::Directive;
use skillhub_domain::error::SkillError;
use skillhub_domain::response::ResponseBuilder;

use crate::ports::{Authority, DeviceGateway};
use crate::routes::namespace;

/// Switch the endpoint on or off and echo the new `powerState`.
///
/// # Errors
///
/// Returns a directive error when the endpoint id or token is missing,
/// [`SkillError::Unauthorized`] when the token is rejected, and
/// [`SkillError::Unreachable`] when the device service fails.
#[tracing::instrument(skip(gateway, authority, directive))]
pub async fn set_power<G, A>(
    gateway: &G,
    authority: &A,
    directive: &Directive,
    power: PowerState,
) -> Result<ResponseBuilder, SkillError>
where
    G: DeviceGateway + Sync,
    A: Authority + Sync,
{
    let mut ack = super::control_ack(directive)?;
    super::push_change(gateway, authority, directive, StateChange::Power(power)).await?;

    ack.add_context_property(namespace::POWER_CONTROLLER, "powerState", power.as_str());
    Ok(ack)
}
