//! `Alexa.ColorController`: set the colour of a light.
//!
//! The device receives the packed RGB integer, but the acknowledgement echoes
//! the HSB value exactly as the platform sent it.

use skillhub_domain::color::{Color, to_device_color};
use skillhub_domain::device::StateChange;
use skillhub_domain::directive::Directive;
use skillhub_domain::error::SkillError;
use skillhub_domain::response::ResponseBuilder;

use crate::ports::{Authority, DeviceGateway};
use crate::routes::namespace;

/// Convert the requested colour, push it, and echo the original request.
///
/// # Errors
///
/// Returns a directive error when the endpoint id, token, or
/// `payload.color` is missing or malformed, [`SkillError::Unauthorized`]
/// when the token is rejected, and [`SkillError::Unreachable`] when the
/// device service fails.
#[tracing::instrument(skip_all)]
pub async fn set_color<G, A>(
    gateway: &G,
    authority: &A,
    directive: &Directive,
) -> Result<ResponseBuilder, SkillError>
where
    G: DeviceGateway + Sync,
    A: Authority + Sync,
{
    let mut ack = super::control_ack(directive)?;
    let requested = directive.payload_value("payload.color")?.clone();
    let color: Color = directive.payload_as("payload.color")?;
    let device_color = to_device_color(&color);

    super::push_change(
        gateway,
        authority,
        directive,
        StateChange::Color(device_color),
    )
    .await?;

    ack.add_context_property(namespace::COLOR_CONTROLLER, "color", requested);
    Ok(ack)
}
