//! `Alexa.Authorization` / `AcceptGrant`: account linking.

use skillhub_domain::directive::Directive;
use skillhub_domain::error::SkillError;
use skillhub_domain::response::ResponseBuilder;

use crate::ports::Authority;
use crate::routes::namespace;

/// Hand the grant to the [`Authority`] and acknowledge it.
///
/// # Errors
///
/// Returns a directive error when `payload.grant.code` or
/// `payload.grantee.token` is missing, or whatever the authority reports.
#[tracing::instrument(skip_all)]
pub async fn accept_grant<A>(authority: &A, directive: &Directive) -> Result<ResponseBuilder, SkillError>
where
    A: Authority + Sync,
{
    let grant_code = directive.payload_str("payload.grant.code")?;
    let grantee_token = directive.payload_str("payload.grantee.token")?;

    authority.accept_grant(grant_code, grantee_token).await?;

    Ok(ResponseBuilder::new(
        namespace::AUTHORIZATION,
        "AcceptGrant.Response",
    ))
}
