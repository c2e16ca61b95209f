//! Common error types used across the workspace.
//!
//! Every failure a directive can run into is a [`SkillError`]. The router
//! never lets one escape: each variant maps to a protocol [`ErrorType`] via
//! [`SkillError::error_type`] and is rendered as an `ErrorResponse` envelope.

use serde::{Deserialize, Serialize};

/// Error categories understood by the voice platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// The directive is malformed or not supported by this skill.
    InvalidDirective,
    /// Unexpected failure inside the skill (e.g. unsupported payload version).
    InternalError,
    /// The device service could not be reached or refused the command.
    EndpointUnreachable,
    /// The device service does not know the requested endpoint.
    NoSuchEndpoint,
    /// The bearer token was rejected.
    InvalidAuthorizationCredential,
    /// The authorization grant could not be accepted.
    AcceptGrantFailed,
}

impl ErrorType {
    /// Wire representation (e.g. `"ENDPOINT_UNREACHABLE"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidDirective => "INVALID_DIRECTIVE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::EndpointUnreachable => "ENDPOINT_UNREACHABLE",
            Self::NoSuchEndpoint => "NO_SUCH_ENDPOINT",
            Self::InvalidAuthorizationCredential => "INVALID_AUTHORIZATION_CREDENTIAL",
            Self::AcceptGrantFailed => "ACCEPT_GRANT_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons an inbound request does not describe a usable directive.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    /// The request has no `directive` object at all.
    #[error("Missing key: directive, Is the request a valid Alexa Directive?")]
    MissingDirective,

    /// A required field is absent; the path is dotted from the directive root.
    #[error("Missing key: {0}")]
    MissingField(&'static str),

    /// The directive object exists but does not have the expected shape.
    #[error("malformed directive")]
    Malformed(#[source] serde_json::Error),

    /// The payload exists but does not match what the directive requires.
    #[error("malformed payload for {directive}")]
    InvalidPayload {
        /// `namespace.name` of the offending directive.
        directive: String,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error for directive handling.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("invalid directive")]
    Directive(#[from] DirectiveError),

    #[error("This skill only supports Smart Home API version 3")]
    UnsupportedVersion(String),

    #[error("unsupported directive {namespace}.{name}")]
    UnknownDirective { namespace: String, name: String },

    #[error("no endpoint with id {0}")]
    NoSuchEndpoint(String),

    #[error("Unable to reach endpoint database.")]
    Unreachable(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("the bearer token was rejected")]
    Unauthorized,

    #[error("the authorization grant was rejected")]
    GrantRejected,
}

impl SkillError {
    /// Protocol error category for this failure.
    #[must_use]
    pub fn error_type(&self) -> ErrorType {
        match self {
            Self::Directive(_) | Self::UnknownDirective { .. } => ErrorType::InvalidDirective,
            Self::UnsupportedVersion(_) => ErrorType::InternalError,
            Self::NoSuchEndpoint(_) => ErrorType::NoSuchEndpoint,
            Self::Unreachable(_) => ErrorType::EndpointUnreachable,
            Self::Unauthorized => ErrorType::InvalidAuthorizationCredential,
            Self::GrantRejected => ErrorType::AcceptGrantFailed,
        }
    }

    /// Human-readable message placed in the error payload.
    ///
    /// Directive errors surface their precise cause; the others use the
    /// variant's display text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Directive(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}
