//! Authority port: who may link an account and which tokens are acceptable.

use std::future::Future;

use skillhub_domain::error::SkillError;

/// Decides on authorization grants and bearer tokens.
pub trait Authority {
    /// Accept (or reject) an `AcceptGrant` directive.
    ///
    /// Rejections are reported as [`SkillError::GrantRejected`].
    fn accept_grant(
        &self,
        grant_code: &str,
        grantee_token: &str,
    ) -> impl Future<Output = Result<(), SkillError>> + Send;

    /// Vet the bearer token of a discovery, report, or control directive
    /// before it is forwarded to the device service.
    ///
    /// Rejections are reported as [`SkillError::Unauthorized`].
    fn verify_token(&self, token: &str) -> impl Future<Output = Result<(), SkillError>> + Send;
}
