//! Host record capability and the per-record binder state it owns.

use chrono_tz::Tz;
use std::collections::BTreeMap;

use crate::container::{is_blank, DateTimeContainer, Timestamp};
use crate::error::DateTimeError;
use crate::zone::ZoneLookup;

/// Record whose timestamp fields are augmented by date/time attributes.
///
/// The record owns one [`DateTimeState`]; it is never persisted and a
/// freshly loaded record starts with an empty one.
pub trait DateTimeHost: ZoneLookup {
    /// Reads the stored combined value of `attribute`.
    fn read_timestamp(&self, attribute: &str) -> Option<Timestamp>;

    /// Writes the combined value of `attribute` to underlying storage.
    fn write_timestamp(&mut self, attribute: &str, value: Option<Timestamp>);

    fn date_time_state(&mut self) -> &mut DateTimeState;
}

/// Binder state of every date/time attribute on one record instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateTimeState {
    attributes: BTreeMap<String, AttributeState>,
}

impl DateTimeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeState> {
        self.attributes.get(name)
    }

    pub(crate) fn attribute_mut(&mut self, name: &str) -> &mut AttributeState {
        self.attributes.entry(name.to_string()).or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Lazily created container plus the raw sub-field inputs of one attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeState {
    container: Option<DateTimeContainer>,
    raw_date: Option<RawInput>,
    raw_time: Option<RawInput>,
    is_set: bool,
    zone_pinned: bool,
}

impl AttributeState {
    pub fn container(&self) -> Option<&DateTimeContainer> {
        self.container.as_ref()
    }

    pub fn raw_date(&self) -> Option<&RawInput> {
        self.raw_date.as_ref()
    }

    pub fn raw_time(&self) -> Option<&RawInput> {
        self.raw_time.as_ref()
    }

    /// Whether a raw date or time sub-setter ran at least once.
    pub fn is_set(&self) -> bool {
        self.is_set
    }

    /// Whether `_time_zone=` bound the container to an explicit zone.
    pub fn zone_pinned(&self) -> bool {
        self.zone_pinned
    }

    /// Both raw inputs absent or blank, after a raw sub-setter ran.
    pub(crate) fn wants_clear(&self) -> bool {
        self.is_set
            && self.raw_date.as_ref().map_or(true, RawInput::is_blank)
            && self.raw_time.as_ref().map_or(true, RawInput::is_blank)
    }

    pub(crate) fn container_or_insert(
        &mut self,
        seed: Option<Timestamp>,
        zone: Tz,
    ) -> &mut DateTimeContainer {
        self.container
            .get_or_insert_with(|| DateTimeContainer::new(seed, zone))
    }

    pub(crate) fn pin_zone(&mut self) {
        self.zone_pinned = true;
    }

    pub(crate) fn record_raw_date(&mut self, raw: RawInput) {
        self.is_set = true;
        self.raw_date = Some(raw);
    }

    pub(crate) fn record_raw_time(&mut self, raw: RawInput) {
        self.is_set = true;
        self.raw_time = Some(raw);
    }
}

/// User-entered sub-field text kept verbatim, with its parse outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput {
    text: Option<String>,
    parsed: Result<(), DateTimeError>,
}

impl RawInput {
    pub(crate) fn new(text: Option<&str>, parsed: Result<(), DateTimeError>) -> Self {
        Self {
            text: text.map(str::to_string),
            parsed,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_blank(&self) -> bool {
        self.text.as_deref().map_or(true, is_blank)
    }

    /// The parse failure recorded for non-blank text, if any.
    pub fn parse_error(&self) -> Option<&DateTimeError> {
        self.parsed.as_ref().err()
    }
}
