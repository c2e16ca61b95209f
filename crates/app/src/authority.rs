//! Permissive [`Authority`] used when no real authorization service is wired.
//!
//! Every grant is accepted and every token passes. This keeps account linking
//! working against a device service that does its own token checks, but it
//! means the skill itself verifies nothing.

use std::future::Future;

use skillhub_domain::error::SkillError;

use crate::ports::Authority;

/// Authority that accepts every grant and every token.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Authority for AcceptAll {
    fn accept_grant(
        &self,
        _grant_code: &str,
        _grantee_token: &str,
    ) -> impl Future<Output = Result<(), SkillError>> + Send {
        tracing::debug!("accepting authorization grant without verification");
        async { Ok(()) }
    }

    fn verify_token(&self, _token: &str) -> impl Future<Output = Result<(), SkillError>> + Send {
        async { Ok(()) }
    }
}
