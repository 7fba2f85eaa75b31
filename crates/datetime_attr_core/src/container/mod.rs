//! Decomposition of one combined timestamp into date, time and zone.
//!
//! # Responsibility
//! - Hold one optional combined value and the zone it is viewed through.
//! - Accept partial updates to the date or time component and recompose.
//!
//! # Invariants
//! - Rebinding the zone never changes the instant, only the local view.
//! - A combined value exists only while a date is known; a time alone is
//!   kept as a pending wall-clock time until a date arrives.
//! - Setting one component keeps the other: the known time (or midnight)
//!   survives a date change, the known date survives a time change.
//!
//! Not shared across threads; each host record owns its containers.

mod input;
mod parse;
mod parser;

use chrono::{
    MappedLocalTime, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone,
};
use chrono_tz::Tz;
use log::debug;

use crate::error::DateTimeResult;

pub use input::{DateInput, TimeInput};
pub use parser::{configure_parser, date_time_parser, DateTimeParser, FormatListParser};
pub use parse::{
    format_date, format_time, is_blank, parse_date, parse_time, parse_timestamp,
    CANONICAL_DATE_FORMAT, CANONICAL_TIME_FORMAT,
};

/// Combined value of a date/time attribute: an instant with its zone.
pub type Timestamp = chrono::DateTime<Tz>;

#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeContainer {
    value: Option<Timestamp>,
    zone: Tz,
    pending_time: Option<NaiveTime>,
}

impl DateTimeContainer {
    pub fn new(value: Option<Timestamp>, zone: Tz) -> Self {
        Self {
            value,
            zone,
            pending_time: None,
        }
    }

    /// Views the same instant through `zone` from now on.
    pub fn in_zone(&mut self, zone: Tz) -> &mut Self {
        self.zone = zone;
        self
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// The combined value expressed in the bound zone.
    pub fn date_time(&self) -> Option<Timestamp> {
        self.value
            .as_ref()
            .map(|value| value.with_timezone(&self.zone))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date_time().map(|value| value.date_naive())
    }

    /// Time of day in the bound zone, or the pending time when no date is
    /// known yet.
    pub fn time(&self) -> Option<NaiveTime> {
        self.date_time()
            .map(|value| value.time())
            .or(self.pending_time)
    }

    /// Adopts `stored` when the underlying storage was written around the
    /// container. Returns whether the value changed.
    ///
    /// A pending time is dropped once storage holds a different value.
    pub fn sync_value(&mut self, stored: Option<Timestamp>) -> bool {
        if self.value == stored {
            return false;
        }
        self.value = stored;
        self.pending_time = None;
        true
    }

    /// Replaces the combined value without touching components.
    pub fn set_date_time(&mut self, value: Option<Timestamp>) {
        self.value = value;
        self.pending_time = None;
    }

    /// Sets the date component and recomposes with the known time.
    ///
    /// # Errors
    /// - `DateParse` when non-blank text is not a date; the container is left
    ///   unchanged.
    pub fn set_date(&mut self, input: impl Into<DateInput>) -> DateTimeResult<Option<NaiveDate>> {
        let date = input.into().parse()?;
        let known_time = self.time();
        match date {
            Some(date) => {
                self.recompose(date, known_time.unwrap_or(NaiveTime::MIN));
            }
            None => {
                self.value = None;
                self.pending_time = known_time;
            }
        }
        Ok(date)
    }

    /// Sets the time component and recomposes with the known date.
    ///
    /// Without a known date the time is kept pending and the combined value
    /// stays absent.
    ///
    /// # Errors
    /// - `TimeParse` when non-blank text is not a time; the container is left
    ///   unchanged.
    pub fn set_time(&mut self, input: impl Into<TimeInput>) -> DateTimeResult<Option<NaiveTime>> {
        let time = input.into().parse()?;
        match self.date() {
            Some(date) => self.recompose(date, time.unwrap_or(NaiveTime::MIN)),
            None => self.pending_time = time,
        }
        Ok(time)
    }

    fn recompose(&mut self, date: NaiveDate, time: NaiveTime) {
        let value = compose(date, time, self.zone);
        debug!(
            "event=container_recompose module=container status=ok zone={} value={}",
            self.zone.name(),
            value.to_rfc3339()
        );
        self.value = Some(value);
        self.pending_time = None;
    }
}

/// Interprets a local wall time in `zone`.
///
/// Repeated wall times take the earlier instant; wall times skipped by a
/// forward transition move forward by the length of the gap.
pub fn compose(date: NaiveDate, time: NaiveTime, zone: Tz) -> Timestamp {
    let local = date.and_time(time);
    match zone.from_local_datetime(&local) {
        MappedLocalTime::Single(value) => value,
        MappedLocalTime::Ambiguous(earliest, _) => earliest,
        MappedLocalTime::None => shift_over_gap(local, zone),
    }
}

fn shift_over_gap(local: NaiveDateTime, zone: Tz) -> Timestamp {
    // a day earlier is safely before the transition
    let probe = local.checked_sub_signed(TimeDelta::days(1)).unwrap_or(local);
    let offset = zone.offset_from_utc_datetime(&probe).fix();
    let utc = local
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        .unwrap_or(local);
    zone.from_utc_datetime(&utc)
}
