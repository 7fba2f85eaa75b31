//! Text form of a combined value: `<RFC 3339>[<zone name>]`.
//!
//! Keeps the zone next to the instant, e.g.
//! `2024-03-10T15:30:00+01:00[Europe/Berlin]`. Text without a bracketed zone
//! decodes in UTC.

use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serializer};

use crate::container::{parse_timestamp, Timestamp};
use crate::error::DateTimeResult;
use crate::zone::parse_zone_name;

pub fn format_wire(value: &Timestamp) -> String {
    format!("{}[{}]", value.to_rfc3339(), value.timezone().name())
}

pub fn parse_wire(text: &str) -> DateTimeResult<Timestamp> {
    let trimmed = text.trim();
    let (instant, zone) = match trimmed
        .strip_suffix(']')
        .and_then(|rest| rest.split_once('['))
    {
        Some((instant, zone)) => (instant, parse_zone_name(zone)?),
        None => (trimmed, Tz::UTC),
    };
    Ok(parse_timestamp(instant)?.with_timezone(&zone))
}

/// Serde adapter for `Option<Timestamp>` fields.
pub mod option {
    use super::{format_wire, parse_wire, Deserialize, Deserializer, Serializer, Timestamp};

    pub fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&format_wire(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| parse_wire(&text).map_err(serde::de::Error::custom))
            .transpose()
    }
}
