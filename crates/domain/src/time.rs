//! Time and timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC timestamp used for `timeOfSample` on context properties.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Serde helpers rendering a [`Timestamp`] the way the smart-home protocol
/// expects it: ISO-8601, UTC, `Z` suffix, two fractional digits.
pub mod protocol_format {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{SecondsFormat, Timestamp};

    /// Serialize as e.g. `2017-02-03T16:20:50.52Z`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    /// Accept any RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error when the string is not RFC 3339.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        chrono::DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(serde::de::Error::custom)
    }

    /// Render the timestamp with centisecond precision.
    #[must_use]
    pub fn format(ts: &Timestamp) -> String {
        // chrono has no centisecond format, so trim the millisecond one.
        let millis = ts.to_rfc3339_opts(SecondsFormat::Millis, true);
        match millis.strip_suffix('Z') {
            Some(body) if body.len() > 1 => format!("{}Z", &body[..body.len() - 1]),
            _ => millis,
        }
    }
}
