//! Directive: an inbound request from the voice platform.
//!
//! A raw request looks like `{"directive": {"header": …, "endpoint": …, "payload": …}}`.
//! [`Directive::from_request`] checks the envelope shape; the typed accessors
//! report missing nested fields as [`DirectiveError::MissingField`] with the
//! dotted path of the field, so handlers never index into JSON blindly.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DirectiveError;
use crate::id::EndpointId;

/// The only payload version this skill speaks.
pub const PAYLOAD_VERSION: &str = "3";

/// A validated inbound directive.
#[derive(Debug, Clone, Deserialize)]
pub struct Directive {
    pub header: Header,
    #[serde(default)]
    pub endpoint: Option<Endpoint>,
    #[serde(default)]
    pub payload: Value,
}

/// Directive header.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub namespace: String,
    pub name: String,
    /// Kept as raw JSON: a version sent as a number is unsupported, not missing.
    pub payload_version: Value,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub correlation_token: Option<String>,
}

/// Target endpoint of a control or report directive.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default)]
    pub endpoint_id: Option<EndpointId>,
    #[serde(default)]
    pub scope: Option<Scope>,
}

/// Authorization scope attached to an endpoint or a discovery payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Scope {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

const REQUIRED_HEADER_FIELDS: [(&str, &str); 2] = [
    ("namespace", "header.namespace"),
    ("name", "header.name"),
];

impl Directive {
    /// Extract the directive from a raw request.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::MissingDirective`] when the request has no
    /// `directive` object, [`DirectiveError::MissingField`] when a required
    /// header field is absent, and [`DirectiveError::Malformed`] when the
    /// directive does not deserialize.
    pub fn from_request(request: &Value) -> Result<Self, DirectiveError> {
        let raw = request
            .get("directive")
            .filter(|value| value.is_object())
            .ok_or(DirectiveError::MissingDirective)?;

        let header = raw
            .get("header")
            .filter(|value| value.is_object())
            .ok_or(DirectiveError::MissingField("header"))?;
        for (field, path) in REQUIRED_HEADER_FIELDS {
            if header.get(field).and_then(Value::as_str).is_none() {
                return Err(DirectiveError::MissingField(path));
            }
        }
        if header.get("payloadVersion").is_none_or(Value::is_null) {
            return Err(DirectiveError::MissingField("header.payloadVersion"));
        }

        Self::deserialize(raw).map_err(DirectiveError::Malformed)
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.header.namespace
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.header.name
    }

    /// `namespace.name`, used in logs and error messages.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.header.namespace, self.header.name)
    }

    /// Whether the header carries the supported payload version.
    #[must_use]
    pub fn has_supported_version(&self) -> bool {
        self.header.payload_version.as_str() == Some(PAYLOAD_VERSION)
    }

    /// The payload version as sent, for error reporting.
    #[must_use]
    pub fn payload_version(&self) -> String {
        match &self.header.payload_version {
            Value::String(version) => version.clone(),
            other => other.to_string(),
        }
    }

    #[must_use]
    pub fn correlation_token(&self) -> Option<&str> {
        self.header.correlation_token.as_deref()
    }

    /// Target endpoint id.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::MissingField`] when there is no endpoint id.
    pub fn endpoint_id(&self) -> Result<&EndpointId, DirectiveError> {
        self.endpoint
            .as_ref()
            .and_then(|endpoint| endpoint.endpoint_id.as_ref())
            .ok_or(DirectiveError::MissingField("endpoint.endpointId"))
    }

    /// Bearer token from the endpoint scope.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::MissingField`] when there is no token.
    pub fn bearer_token(&self) -> Result<&str, DirectiveError> {
        self.endpoint
            .as_ref()
            .and_then(|endpoint| endpoint.scope.as_ref())
            .and_then(|scope| scope.token.as_deref())
            .ok_or(DirectiveError::MissingField("endpoint.scope.token"))
    }

    /// Look up a nested payload value by dotted path (`"payload.grant.code"`).
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::MissingField`] with `path` when any segment
    /// is absent or `null`.
    pub fn payload_value(&self, path: &'static str) -> Result<&Value, DirectiveError> {
        path.split('.')
            .skip(1)
            .try_fold(&self.payload, |current, segment| {
                current.get(segment).filter(|value| !value.is_null())
            })
            .ok_or(DirectiveError::MissingField(path))
    }

    /// Like [`payload_value`](Self::payload_value) but requires a string.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::MissingField`] when the value is absent or
    /// not a string.
    pub fn payload_str(&self, path: &'static str) -> Result<&str, DirectiveError> {
        self.payload_value(path)?
            .as_str()
            .ok_or(DirectiveError::MissingField(path))
    }

    /// Decode a nested payload value into a typed structure.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::MissingField`] when the value is absent and
    /// [`DirectiveError::InvalidPayload`] when it has the wrong shape.
    pub fn payload_as<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, DirectiveError> {
        let value = self.payload_value(path)?;
        T::deserialize(value).map_err(|source| DirectiveError::InvalidPayload {
            directive: self.qualified_name(),
            source,
        })
    }
}
