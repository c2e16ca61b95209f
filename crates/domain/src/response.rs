//! Response envelopes and the builder that assembles them.
//!
//! Every answer to a directive is a [`ResponseEnvelope`]:
//!
//! ```json
//! {
//!   "event": {
//!     "header": { "namespace": "Alexa", "name": "Response", "messageId": "…",
//!                 "correlationToken": "…", "payloadVersion": "3" },
//!     "endpoint": { "scope": { "type": "BearerToken", "token": "…" }, "endpointId": "…" },
//!     "payload": {}
//!   },
//!   "context": { "properties": [ … ] }
//! }
//! ```
//!
//! `context` is left out entirely when no property was added, and
//! `correlationToken` when the directive carried none. Discovery responses
//! always carry `payload.endpoints`, even when empty.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::capability::EndpointDescriptor;
use crate::directive::PAYLOAD_VERSION;
use crate::error::ErrorType;
use crate::id::{EndpointId, MessageId};
use crate::time::{Timestamp, now};

/// Header name of discovery responses.
pub const DISCOVER_RESPONSE: &str = "Discover.Response";

/// Header name of error responses.
pub const ERROR_RESPONSE: &str = "ErrorResponse";

/// Uncertainty attached to every context property.
pub const DEFAULT_UNCERTAINTY_MS: u32 = 500;

/// A reported capability value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextProperty {
    pub namespace: String,
    pub name: String,
    pub value: Value,
    #[serde(with = "crate::time::protocol_format")]
    pub time_of_sample: Timestamp,
    pub uncertainty_in_milliseconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseHeader {
    pub namespace: String,
    pub name: String,
    pub message_id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_token: Option<String>,
    pub payload_version: String,
}

/// Endpoint echoed back on control and report responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<BearerScope>,
    pub endpoint_id: EndpointId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerScope {
    #[serde(rename = "type")]
    pub kind: String,
    pub token: String,
}

/// Event payload: the endpoint list of a discovery response, or free-form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Discovery { endpoints: Vec<EndpointDescriptor> },
    Fields(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEvent {
    pub header: ResponseHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EndpointRef>,
    pub payload: ResponsePayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseContext {
    pub properties: Vec<ContextProperty>,
}

/// The complete outbound response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ResponseContext>,
    pub event: ResponseEvent,
}

impl ResponseEnvelope {
    #[must_use]
    pub fn header(&self) -> &ResponseHeader {
        &self.event.header
    }

    /// Context properties, empty when the envelope has no context.
    #[must_use]
    pub fn properties(&self) -> &[ContextProperty] {
        self.context
            .as_ref()
            .map(|context| context.properties.as_slice())
            .unwrap_or_default()
    }

    /// Find a context property by interface and name.
    #[must_use]
    pub fn property(&self, namespace: &str, name: &str) -> Option<&ContextProperty> {
        self.properties()
            .iter()
            .find(|p| p.namespace == namespace && p.name == name)
    }

    /// Discovered endpoints; empty for non-discovery responses.
    #[must_use]
    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        match &self.event.payload {
            ResponsePayload::Discovery { endpoints } => endpoints.as_slice(),
            ResponsePayload::Fields(_) => &[],
        }
    }

    /// Error category when this is an `ErrorResponse`.
    #[must_use]
    pub fn error_type(&self) -> Option<ErrorType> {
        if self.event.header.name != ERROR_RESPONSE {
            return None;
        }
        match &self.event.payload {
            ResponsePayload::Fields(fields) => fields
                .get("type")
                .and_then(|value| ErrorType::deserialize(value).ok()),
            ResponsePayload::Discovery { .. } => None,
        }
    }
}

/// Incrementally assembles a [`ResponseEnvelope`].
///
/// The message id is drawn when the builder is created, so calling
/// [`get`](Self::get) repeatedly yields the same id.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    namespace: String,
    name: String,
    message_id: MessageId,
    correlation_token: Option<String>,
    endpoint: Option<EndpointRef>,
    payload: Map<String, Value>,
    endpoints: Option<Vec<EndpointDescriptor>>,
    properties: Vec<ContextProperty>,
}

impl ResponseBuilder {
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let endpoints = (name == DISCOVER_RESPONSE).then(Vec::new);
        Self {
            namespace: namespace.into(),
            name,
            message_id: MessageId::new(),
            correlation_token: None,
            endpoint: None,
            payload: Map::new(),
            endpoints,
            properties: Vec::new(),
        }
    }

    /// Plain `Alexa`/`Response` acknowledgement.
    #[must_use]
    pub fn ack() -> Self {
        Self::new("Alexa", "Response")
    }

    /// `Alexa`/`ErrorResponse` with the `{type, message}` payload.
    #[must_use]
    pub fn error(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self::new("Alexa", ERROR_RESPONSE)
            .with_payload_field("type", error_type.as_str())
            .with_payload_field("message", message.into())
    }

    /// Override the header namespace (e.g. errors in `Alexa.Authorization`).
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Echo the target endpoint, with its bearer token when known.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint_id: EndpointId, token: Option<String>) -> Self {
        self.endpoint = Some(EndpointRef {
            scope: token.map(|token| BearerScope {
                kind: "BearerToken".to_string(),
                token,
            }),
            endpoint_id,
        });
        self
    }

    #[must_use]
    pub fn with_correlation_token(mut self, correlation_token: Option<String>) -> Self {
        self.correlation_token = correlation_token;
        self
    }

    #[must_use]
    pub fn with_payload_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a context property sampled now.
    ///
    /// Each `(namespace, name)` pair must be added at most once per envelope.
    pub fn add_context_property(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        let property = ContextProperty {
            namespace: namespace.into(),
            name: name.into(),
            value: value.into(),
            time_of_sample: now(),
            uncertainty_in_milliseconds: DEFAULT_UNCERTAINTY_MS,
        };
        debug_assert!(
            !self
                .properties
                .iter()
                .any(|p| p.namespace == property.namespace && p.name == property.name),
            "duplicate context property {}.{}",
            property.namespace,
            property.name
        );
        self.properties.push(property);
        self
    }

    /// Append a discovered endpoint.
    ///
    /// Returns `false`, leaving the builder untouched, when this is not a
    /// discovery response.
    pub fn add_payload_endpoint(&mut self, endpoint: EndpointDescriptor) -> bool {
        match self.endpoints.as_mut() {
            Some(endpoints) => {
                endpoints.push(endpoint);
                true
            }
            None => false,
        }
    }

    /// Snapshot the accumulated state as an envelope.
    #[must_use]
    pub fn get(&self) -> ResponseEnvelope {
        let payload = match &self.endpoints {
            Some(endpoints) => ResponsePayload::Discovery {
                endpoints: endpoints.clone(),
            },
            None => ResponsePayload::Fields(self.payload.clone()),
        };
        let context = (!self.properties.is_empty()).then(|| ResponseContext {
            properties: self.properties.clone(),
        });

        ResponseEnvelope {
            context,
            event: ResponseEvent {
                header: ResponseHeader {
                    namespace: self.namespace.clone(),
                    name: self.name.clone(),
                    message_id: self.message_id,
                    correlation_token: self.correlation_token.clone(),
                    payload_version: PAYLOAD_VERSION.to_string(),
                },
                endpoint: self.endpoint.clone(),
                payload,
            },
        }
    }
}
