//! JSON shapes exchanged with the device service.
//!
//! The service is loose about types: `OnOff` arrives as a boolean or as the
//! strings `"true"`/`"false"`, and `Color` as a number or a numeric string.
//! Values that cannot be read leave the corresponding state unknown.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;
use skillhub_domain::color::DeviceColor;
use skillhub_domain::device::{Connectivity, Device, PowerState, StateChange};
use skillhub_domain::id::EndpointId;

/// Body of `GET /devices`.
#[derive(Debug, Deserialize)]
pub struct DeviceList {
    pub list: Vec<String>,
    #[serde(default)]
    pub states: HashMap<String, DeviceMeta>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeviceMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "OnOff")]
    pub on_off: Option<Value>,
    #[serde(default, rename = "Color")]
    pub color: Option<Value>,
    #[serde(default)]
    pub online: Option<bool>,
}

fn read_power(value: &Value) -> Option<PowerState> {
    match value {
        Value::Bool(on) => Some(PowerState::from(*on)),
        Value::String(text) => match text.trim() {
            "true" => Some(PowerState::On),
            "false" => Some(PowerState::Off),
            _ => None,
        },
        _ => None,
    }
}

fn read_color(value: &Value) -> Option<DeviceColor> {
    let packed = match value {
        Value::Number(number) => number.as_u64()?,
        Value::String(text) => text.trim().parse().ok()?,
        _ => return None,
    };
    u32::try_from(packed)
        .ok()
        .filter(|packed| *packed <= DeviceColor::MAX)
        .map(DeviceColor::new)
}

impl DeviceList {
    /// Devices in listing order; ids without metadata are named after themselves.
    ///
    /// An id listed more than once is kept at its first position only.
    pub fn into_devices(mut self) -> Vec<Device> {
        let mut seen = HashSet::new();
        self.list
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .map(|id| {
                let meta = self.states.remove(&id).unwrap_or_default();
                let name = meta.name.unwrap_or_else(|| id.clone());
                let mut device = Device::new(id, name);
                device.state.power = meta.on_off.as_ref().and_then(read_power);
                device.state.color = meta.color.as_ref().and_then(read_color);
                if meta.online == Some(false) {
                    device.state.connectivity = Connectivity::Unreachable;
                }
                device
            })
            .collect()
    }
}

/// Query pairs for `GET /set`.
pub fn set_query(endpoint_id: &EndpointId, change: StateChange) -> [(&'static str, String); 2] {
    let (attribute, payload) = match change {
        StateChange::Power(power) => ("OnOff", power.is_on().to_string()),
        StateChange::Color(color) => ("Color", color.value().to_string()),
    };
    [
        ("topic", format!("{endpoint_id}/{attribute}")),
        ("payload", payload),
    ]
}
