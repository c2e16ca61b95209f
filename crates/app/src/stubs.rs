//! In-memory port implementations and request fixtures for unit tests.

use std::sync::Mutex;

use serde_json::{Value, json};
use skillhub_domain::device::{Device, StateChange};
use skillhub_domain::error::SkillError;
use skillhub_domain::id::EndpointId;

use crate::ports::{Authority, DeviceGateway};

pub type RecordedChange = (EndpointId, StateChange, String);

#[derive(Debug, Clone, Copy)]
enum Failure {
    Unreachable,
    UnknownEndpoint,
}

/// Gateway serving a fixed device list and recording every pushed change.
#[derive(Debug, Default)]
pub struct StubGateway {
    devices: Vec<Device>,
    failure: Option<Failure>,
    listed: Mutex<Vec<String>>,
    changes: Mutex<Vec<RecordedChange>>,
}

impl StubGateway {
    pub fn with_devices(devices: Vec<Device>) -> Self {
        Self {
            devices,
            ..Self::default()
        }
    }

    /// Gateway whose every call fails as if the service were down.
    pub fn unreachable() -> Self {
        Self {
            failure: Some(Failure::Unreachable),
            ..Self::default()
        }
    }

    /// Gateway that fails every call with an error other than `Unreachable`.
    pub fn rejecting_endpoints() -> Self {
        Self {
            failure: Some(Failure::UnknownEndpoint),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedChange> {
        self.changes.lock().unwrap().clone()
    }

    /// Tokens passed to `list_devices`, in call order.
    pub fn tokens(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), SkillError> {
        match self.failure {
            None => Ok(()),
            Some(Failure::Unreachable) => {
                Err(SkillError::Unreachable("connection refused".into()))
            }
            Some(Failure::UnknownEndpoint) => {
                Err(SkillError::NoSuchEndpoint("light-01".to_string()))
            }
        }
    }
}

impl DeviceGateway for StubGateway {
    async fn list_devices(&self, token: &str) -> Result<Vec<Device>, SkillError> {
        self.listed.lock().unwrap().push(token.to_string());
        self.check()?;
        Ok(self.devices.clone())
    }

    async fn set_state(
        &self,
        endpoint_id: &EndpointId,
        change: StateChange,
        token: &str,
    ) -> Result<(), SkillError> {
        self.check()?;
        self.changes
            .lock()
            .unwrap()
            .push((endpoint_id.clone(), change, token.to_string()));
        Ok(())
    }
}

/// Authority refusing every grant and every token.
#[derive(Debug, Clone, Copy)]
pub struct RejectAll;

impl Authority for RejectAll {
    async fn accept_grant(&self, _grant_code: &str, _grantee_token: &str) -> Result<(), SkillError> {
        Err(SkillError::GrantRejected)
    }

    async fn verify_token(&self, _token: &str) -> Result<(), SkillError> {
        Err(SkillError::Unauthorized)
    }
}

/// A version 3 request without an endpoint.
pub fn request(namespace: &str, name: &str, payload: Value) -> Value {
    json!({
        "directive": {
            "header": {
                "namespace": namespace,
                "name": name,
                "payloadVersion": "3",
                "messageId": "1bd5d003-31b9-476f-ad03-71d471922820",
                "correlationToken": "corr-token"
            },
            "payload": payload
        }
    })
}

fn with_endpoint(mut request: Value) -> Value {
    request["directive"]["endpoint"] = json!({
        "scope": { "type": "BearerToken", "token": "access-token" },
        "endpointId": "light-01",
        "cookie": {}
    });
    request
}

pub fn power_request(name: &str) -> Value {
    with_endpoint(request("Alexa.PowerController", name, json!({})))
}

pub fn color_request(color: Value) -> Value {
    with_endpoint(request(
        "Alexa.ColorController",
        "SetColor",
        json!({ "color": color }),
    ))
}

/// Captures formatted log output for the current thread.
#[derive(Debug, Clone, Default)]
pub struct LogCapture(std::sync::Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
