//! Device: a controllable light as reported by the downstream device service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::DeviceColor;
use crate::id::EndpointId;

/// Power state as named by the voice platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    /// Protocol value (`"ON"` / `"OFF"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for PowerState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reachability of an endpoint, as reported through `Alexa.EndpointHealth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connectivity {
    #[default]
    Ok,
    Unreachable,
}

impl Connectivity {
    /// Protocol value (`"OK"` / `"UNREACHABLE"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Unreachable => "UNREACHABLE",
        }
    }
}

/// Last known state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceState {
    pub power: Option<PowerState>,
    pub color: Option<DeviceColor>,
    pub connectivity: Connectivity,
}

/// A device listed by the device service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: EndpointId,
    pub name: String,
    pub state: DeviceState,
}

impl Device {
    /// Create a device with unknown power/colour and healthy connectivity.
    #[must_use]
    pub fn new(id: impl Into<EndpointId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: DeviceState::default(),
        }
    }

    #[must_use]
    pub fn with_power(mut self, power: PowerState) -> Self {
        self.state.power = Some(power);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: DeviceColor) -> Self {
        self.state.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.state.connectivity = connectivity;
        self
    }
}

/// A command pushed to the device service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Power(PowerState),
    Color(DeviceColor),
}

impl StateChange {
    /// Attribute name the change applies to (`"powerState"` or `"color"`).
    #[must_use]
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Power(_) => "powerState",
            Self::Color(_) => "color",
        }
    }

    /// Apply the change to a state snapshot.
    pub fn apply(&self, state: &mut DeviceState) {
        match *self {
            Self::Power(power) => state.power = Some(power),
            Self::Color(color) => state.color = Some(color),
        }
    }
}
