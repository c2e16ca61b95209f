//! # skillhub-adapter-virtual
//!
//! Virtual device gateway that serves simulated lights for demos and tests.
//!
//! ## Provided devices
//!
//! | Endpoint id | Name | Initial state |
//! |-------------|------|---------------|
//! | `virtual-light-1` | Living Room | off |
//! | `virtual-light-2` | Kitchen | off |
//! | `virtual-light-3` | Bedroom | off |
//!
//! Tokens are accepted as-is. Commands for an unknown light fail as
//! unreachable, like any other device service failure. The gateway can also
//! be switched to an unreachable mode to exercise the `ENDPOINT_UNREACHABLE`
//! path.
//!
//! ## Dependency rule
//!
//! Depends on `skillhub-app` (port traits) and `skillhub-domain` only.

mod light;

use std::sync::atomic::{AtomicBool, Ordering};

use skillhub_app::ports::DeviceGateway;
use skillhub_domain::device::{Device, StateChange};
use skillhub_domain::error::SkillError;
use skillhub_domain::id::EndpointId;

pub use light::VirtualLight;

/// In-memory gateway holding a fixed set of [`VirtualLight`]s.
#[derive(Debug)]
pub struct VirtualGateway {
    lights: Vec<VirtualLight>,
    reachable: AtomicBool,
}

impl Default for VirtualGateway {
    fn default() -> Self {
        Self::new(vec![
            VirtualLight::new("virtual-light-1", "Living Room"),
            VirtualLight::new("virtual-light-2", "Kitchen"),
            VirtualLight::new("virtual-light-3", "Bedroom"),
        ])
    }
}

impl VirtualGateway {
    pub fn new(lights: Vec<VirtualLight>) -> Self {
        Self {
            lights,
            reachable: AtomicBool::new(true),
        }
    }

    /// Simulate the device service going down (or coming back).
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::Relaxed);
    }

    /// Current state of every light, in declaration order.
    #[must_use]
    pub fn devices(&self) -> Vec<Device> {
        self.lights.iter().map(VirtualLight::snapshot).collect()
    }

    fn ensure_reachable(&self) -> Result<(), SkillError> {
        if self.reachable.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(SkillError::Unreachable("virtual device service is offline".into()))
        }
    }
}

impl DeviceGateway for VirtualGateway {
    async fn list_devices(&self, _token: &str) -> Result<Vec<Device>, SkillError> {
        self.ensure_reachable()?;
        Ok(self.devices())
    }

    async fn set_state(
        &self,
        endpoint_id: &EndpointId,
        change: StateChange,
        _token: &str,
    ) -> Result<(), SkillError> {
        self.ensure_reachable()?;
        let light = self
            .lights
            .iter()
            .find(|light| light.id() == endpoint_id)
            .ok_or_else(|| {
                SkillError::Unreachable(format!("no virtual light {endpoint_id}").into())
            })?;

        let state = light.apply(change);
        tracing::debug!(
            endpoint_id = %endpoint_id,
            power = ?state.power,
            color = ?state.color,
            "virtual light updated"
        );
        Ok(())
    }
}
