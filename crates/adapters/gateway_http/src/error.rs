//! Gateway-specific error type wrapping reqwest errors.

use skillhub_domain::error::SkillError;

/// Errors originating from the device service.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request could not be sent or the response not read.
    #[error("HTTP error")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("device service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The device list could not be decoded.
    #[error("invalid device list")]
    Json(#[from] serde_json::Error),
}

impl From<GatewayError> for SkillError {
    fn from(err: GatewayError) -> Self {
        Self::Unreachable(Box::new(err))
    }
}
