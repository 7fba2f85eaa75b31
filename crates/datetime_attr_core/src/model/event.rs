//! Event domain model.
//!
//! # Responsibility
//! - Carry the `starts_at`/`ends_at` combined values and the event zone.
//! - Bind both timestamps as date/time attributes read in the event zone.
//!
//! # Invariants
//! - `uuid` is never nil.
//! - `ends_at` should not be earlier than `starts_at` when both are set.
//! - `time_zone` is looked up on every attribute operation, so changing it
//!   changes how later reads decompose the stored instants.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::attribute::{
    AttributeOptions, DateTimeAttributes, DateTimeHost, DateTimeState, DeclarationError,
    ValidationErrors,
};
use crate::container::Timestamp;
use crate::error::DateTimeError;
use crate::zone::{TimeZoneSpec, ZoneLookup};

/// Stable identifier of an event.
pub type EventId = Uuid;

pub const STARTS_AT: &str = "starts_at";
pub const ENDS_AT: &str = "ends_at";
/// Lookup key answered with the event's own zone name.
pub const TIME_ZONE_KEY: &str = "time_zone";

static EVENT_ATTRIBUTES: OnceCell<DateTimeAttributes<Event>> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub uuid: EventId,
    pub title: String,
    #[serde(default, with = "crate::model::wire::option")]
    pub starts_at: Option<Timestamp>,
    #[serde(default, with = "crate::model::wire::option")]
    pub ends_at: Option<Timestamp>,
    /// IANA zone name; `None` reads and writes in the default zone.
    pub time_zone: Option<String>,
    #[serde(skip)]
    date_time_state: DateTimeState,
}

impl Event {
    /// Creates an unscheduled event with a generated ID.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            starts_at: None,
            ends_at: None,
            time_zone: None,
            date_time_state: DateTimeState::new(),
        }
    }

    /// Creates an event with a caller-provided ID, as import paths do.
    pub fn with_id(uuid: EventId, title: impl Into<String>) -> Result<Self, EventError> {
        if uuid.is_nil() {
            return Err(EventError::NilUuid);
        }
        let mut event = Self::new(title);
        event.uuid = uuid;
        Ok(event)
    }

    /// Date/time attributes declared for every event.
    pub fn attributes() -> Result<&'static DateTimeAttributes<Event>, DeclarationError> {
        EVENT_ATTRIBUTES.get_or_try_init(|| {
            DateTimeAttributes::declared(
                [STARTS_AT, ENDS_AT],
                AttributeOptions::new().time_zone(TimeZoneSpec::lookup(TIME_ZONE_KEY)),
            )
        })
    }

    /// Assigns one generated field, e.g. `starts_at_date_value`.
    pub fn assign(&mut self, field: &str, value: Option<&str>) -> Result<(), EventError> {
        Self::attributes()?.assign(self, field, value)?;
        Ok(())
    }

    /// Reads one generated field as display text.
    pub fn read(&mut self, field: &str) -> Result<Option<String>, EventError> {
        Ok(Self::attributes()?.read(self, field)?)
    }

    /// Runs the clear rule and validity checks, then the event window check.
    ///
    /// # Errors
    /// - `Fields` when a raw date or time input is malformed.
    /// - `InvalidEventWindow` when `ends_at < starts_at`.
    pub fn validate(&mut self) -> Result<(), EventError> {
        let errors = Self::attributes()?.validate(self)?;
        if !errors.is_empty() {
            return Err(EventError::Fields(errors));
        }
        self.check_window()
    }

    /// Rejects `ends_at < starts_at`; either side absent passes.
    pub fn check_window(&self) -> Result<(), EventError> {
        if let (Some(start), Some(end)) = (self.starts_at, self.ends_at) {
            if end < start {
                return Err(EventError::InvalidEventWindow { start, end });
            }
        }
        Ok(())
    }

    /// Transient binder state; empty until a date/time accessor runs.
    pub fn binder_state(&self) -> &DateTimeState {
        &self.date_time_state
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
            && self.title == other.title
            && self.starts_at == other.starts_at
            && self.ends_at == other.ends_at
            && self.time_zone == other.time_zone
    }
}

impl ZoneLookup for Event {
    fn lookup_time_zone(&self, key: &str) -> Option<String> {
        match key {
            TIME_ZONE_KEY => self.time_zone.clone(),
            _ => None,
        }
    }
}

impl DateTimeHost for Event {
    fn read_timestamp(&self, attribute: &str) -> Option<Timestamp> {
        match attribute {
            STARTS_AT => self.starts_at,
            ENDS_AT => self.ends_at,
            _ => None,
        }
    }

    fn write_timestamp(&mut self, attribute: &str, value: Option<Timestamp>) {
        match attribute {
            STARTS_AT => self.starts_at = value,
            ENDS_AT => self.ends_at = value,
            _ => {}
        }
    }

    fn date_time_state(&mut self) -> &mut DateTimeState {
        &mut self.date_time_state
    }
}

/// Event validation and attribute errors.
#[derive(Debug, Clone, PartialEq)]
pub enum EventError {
    NilUuid,
    Declaration(DeclarationError),
    DateTime(DateTimeError),
    Fields(ValidationErrors),
    InvalidEventWindow { start: Timestamp, end: Timestamp },
}

impl Display for EventError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "uuid must not be nil"),
            Self::Declaration(err) => write!(f, "{err}"),
            Self::DateTime(err) => write!(f, "{err}"),
            Self::Fields(errors) => write!(f, "{errors}"),
            Self::InvalidEventWindow { start, end } => write!(
                f,
                "ends_at ({}) must be >= starts_at ({})",
                end.to_rfc3339(),
                start.to_rfc3339()
            ),
        }
    }
}

impl Error for EventError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Declaration(err) => Some(err),
            Self::DateTime(err) => Some(err),
            Self::NilUuid | Self::Fields(_) | Self::InvalidEventWindow { .. } => None,
        }
    }
}

impl From<DeclarationError> for EventError {
    fn from(value: DeclarationError) -> Self {
        Self::Declaration(value)
    }
}

impl From<DateTimeError> for EventError {
    fn from(value: DateTimeError) -> Self {
        Self::DateTime(value)
    }
}
