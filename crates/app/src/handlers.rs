//! Directive handlers: one module per supported directive.
//!
//! Each handler pulls what it needs out of the [`Directive`], failing with
//! `INVALID_DIRECTIVE` before any IO when a field is missing, then talks to
//! the ports and returns the [`ResponseBuilder`] for the success envelope.
//! Failures are returned as [`SkillError`]s; the router renders them.

pub mod authorization;
pub mod color;
pub mod discovery;
pub mod power;
pub mod report_state;

use skillhub_domain::device::StateChange;
use skillhub_domain::directive::Directive;
use skillhub_domain::error::SkillError;
use skillhub_domain::response::ResponseBuilder;

use crate::ports::{Authority, DeviceGateway};

/// Start the success acknowledgement for a control directive.
fn control_ack(directive: &Directive) -> Result<ResponseBuilder, SkillError> {
    let endpoint_id = directive.endpoint_id()?.clone();
    let token = directive.bearer_token()?.to_string();
    Ok(ResponseBuilder::ack()
        .with_endpoint(endpoint_id, Some(token))
        .with_correlation_token(directive.correlation_token().map(str::to_string)))
}

/// Report any gateway failure as [`SkillError::Unreachable`], keeping the
/// original error as its source.
fn unreachable(err: SkillError) -> SkillError {
    match err {
        SkillError::Unreachable(_) => err,
        other => SkillError::Unreachable(Box::new(other)),
    }
}

/// Vet the token and push one state change for the directive's endpoint.
async fn push_change<G, A>(
    gateway: &G,
    authority: &A,
    directive: &Directive,
    change: StateChange,
) -> Result<(), SkillError>
where
    G: DeviceGateway + Sync,
    A: Authority + Sync,
{
    let endpoint_id = directive.endpoint_id()?;
    let token = directive.bearer_token()?;
    authority.verify_token(token).await?;

    tracing::debug!(
        endpoint_id = %endpoint_id,
        attribute = change.attribute(),
        "pushing state change"
    );
    gateway
        .set_state(endpoint_id, change, token)
        .await
        .map_err(unreachable)
}
