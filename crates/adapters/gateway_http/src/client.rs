//! reqwest client for the device service.

use std::time::Duration;

use skillhub_app::ports::DeviceGateway;
use skillhub_domain::device::{Device, StateChange};
use skillhub_domain::error::SkillError;
use skillhub_domain::id::EndpointId;

use crate::error::GatewayError;
use crate::wire::{self, DeviceList};

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Device gateway talking to the remote service over HTTP.
///
/// Requests are sent once; any failure, including a timeout, surfaces as
/// [`SkillError::Unreachable`].
#[derive(Debug, Clone)]
pub struct HttpDeviceGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDeviceGateway {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs an authenticated GET request.
    async fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
        token: &str,
    ) -> Result<Vec<u8>, GatewayError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(params)
            .bearer_auth(token)
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }

    /// Fetch and decode `GET /devices`.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn fetch_devices(&self, token: &str) -> Result<Vec<Device>, GatewayError> {
        let body = self.get("/devices", &[], token).await?;
        let list: DeviceList = serde_json::from_slice(&body)?;
        Ok(list.into_devices())
    }

    /// Send one `GET /set` command.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport failure or non-2xx status.
    pub async fn send_change(
        &self,
        endpoint_id: &EndpointId,
        change: StateChange,
        token: &str,
    ) -> Result<(), GatewayError> {
        let params = wire::set_query(endpoint_id, change);
        self.get("/set", &params, token).await?;
        Ok(())
    }
}

impl DeviceGateway for HttpDeviceGateway {
    async fn list_devices(&self, token: &str) -> Result<Vec<Device>, SkillError> {
        let devices = self.fetch_devices(token).await.inspect_err(|err| {
            tracing::warn!(error = %err, base_url = %self.base_url, "device listing failed");
        })?;
        tracing::debug!(count = devices.len(), "devices listed");
        Ok(devices)
    }

    async fn set_state(
        &self,
        endpoint_id: &EndpointId,
        change: StateChange,
        token: &str,
    ) -> Result<(), SkillError> {
        self.send_change(endpoint_id, change, token)
            .await
            .inspect_err(|err| {
                tracing::warn!(
                    error = %err,
                    endpoint_id = %endpoint_id,
                    attribute = change.attribute(),
                    "device command failed"
                );
            })?;
        Ok(())
    }
}
