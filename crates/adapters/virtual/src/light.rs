//! Virtual light: keeps its power and colour in memory.

use std::sync::Mutex;

use skillhub_domain::device::{Device, DeviceState, PowerState, StateChange};
use skillhub_domain::id::EndpointId;

/// A simulated colour light.
#[derive(Debug)]
pub struct VirtualLight {
    id: EndpointId,
    name: String,
    state: Mutex<DeviceState>,
}

impl VirtualLight {
    /// A light that starts switched off with no colour set.
    pub fn new(id: impl Into<EndpointId>, name: impl Into<String>) -> Self {
        let state = DeviceState {
            power: Some(PowerState::Off),
            ..DeviceState::default()
        };
        Self {
            id: id.into(),
            name: name.into(),
            state: Mutex::new(state),
        }
    }

    pub fn id(&self) -> &EndpointId {
        &self.id
    }

    /// Snapshot of the light as the device service would list it.
    pub fn snapshot(&self) -> Device {
        Device {
            id: self.id.clone(),
            name: self.name.clone(),
            state: *self.lock_state(),
        }
    }

    /// Apply a command, returning the new state.
    pub fn apply(&self, change: StateChange) -> DeviceState {
        let mut state = self.lock_state();
        change.apply(&mut state);
        *state
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, DeviceState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
