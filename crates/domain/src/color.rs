//! Colour codec: protocol HSB triples to and from the device API's packed
//! `0xRRGGBB` integers.
//!
//! The conversion is the standard six-sector HSV model. It is lossy only
//! through 8-bit quantization of each RGB channel (truncation, not rounding).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Colour as exchanged with the voice platform.
///
/// `hue` is in degrees `[0, 360]`, `saturation` and `brightness` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Color {
    #[must_use]
    pub fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Copy with every component forced into its valid range.
    ///
    /// NaN components become `0`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            hue: clamp_or_zero(self.hue, 360.0),
            saturation: clamp_or_zero(self.saturation, 1.0),
            brightness: clamp_or_zero(self.brightness, 1.0),
        }
    }

    /// Unquantized RGB channels in `[0, 1]`.
    #[must_use]
    pub fn to_rgb(self) -> [f64; 3] {
        let Self {
            hue,
            saturation,
            brightness,
        } = self.clamped();

        if saturation == 0.0 {
            return [brightness; 3];
        }

        // hue / 360 * 6, computed directly so sector boundaries stay exact.
        let h6 = hue / 60.0;
        let sector = h6.floor();
        let f = h6 - sector;
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let sector = (sector as u32) % 6;
        match sector {
            0 => [brightness, t, p],
            1 => [q, brightness, p],
            2 => [p, brightness, t],
            3 => [p, q, brightness],
            4 => [t, p, brightness],
            _ => [brightness, p, q],
        }
    }

    /// Build a colour from RGB channels in `[0, 1]`.
    #[must_use]
    pub fn from_rgb([r, g, b]: [f64; 3]) -> Self {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let brightness = max;
        if (max - min).abs() < f64::EPSILON {
            return Self::new(0.0, 0.0, brightness);
        }

        let delta = max - min;
        let saturation = delta / max;
        let rc = (max - r) / delta;
        let gc = (max - g) / delta;
        let bc = (max - b) / delta;

        let h = if (r - max).abs() < f64::EPSILON {
            bc - gc
        } else if (g - max).abs() < f64::EPSILON {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        let hue = (h / 6.0).rem_euclid(1.0) * 360.0;

        Self::new(hue, saturation, brightness)
    }
}

impl From<Color> for serde_json::Value {
    fn from(color: Color) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("hue".to_string(), color.hue.into());
        fields.insert("saturation".to_string(), color.saturation.into());
        fields.insert("brightness".to_string(), color.brightness.into());
        Self::Object(fields)
    }
}

fn clamp_or_zero(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

/// Colour as the device API expects it: RGB bytes packed into one integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceColor(u32);

impl DeviceColor {
    /// Largest valid value (`0xFFFFFF`, white).
    pub const MAX: u32 = 0x00FF_FFFF;

    /// Wrap a packed value, discarding anything above the low 24 bits.
    #[must_use]
    pub fn new(packed: u32) -> Self {
        Self(packed & Self::MAX)
    }

    #[must_use]
    pub fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Self((u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
    }

    /// Packed integer value.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Individual `(r, g, b)` bytes.
    #[must_use]
    pub fn channels(self) -> (u8, u8, u8) {
        let [_, r, g, b] = self.0.to_be_bytes();
        (r, g, b)
    }
}

impl fmt::Display for DeviceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::LowerHex for DeviceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Encode a protocol colour for the device API.
///
/// Out-of-range components are clamped first (see [`Color::clamped`]).
#[must_use]
pub fn to_device_color(color: &Color) -> DeviceColor {
    let [r, g, b] = color.to_rgb().map(quantize);
    DeviceColor::from_channels(r, g, b)
}

/// Decode a device colour back into the protocol representation.
#[must_use]
pub fn from_device_color(color: DeviceColor) -> Color {
    let (r, g, b) = color.channels();
    Color::from_rgb([r, g, b].map(|c| f64::from(c) / 255.0))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantize(channel: f64) -> u8 {
    // Channels are already in [0, 1]; `as` saturates and truncates.
    (255.0 * channel) as u8
}
