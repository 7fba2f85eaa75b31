//! Component inputs accepted by the container setters.

use chrono::{NaiveDate, NaiveTime};

use super::parse::is_blank;
use super::parser::{date_time_parser, DateTimeParser};
use crate::error::DateTimeResult;

/// Value assigned to the date component.
///
/// Blank text and `Blank` both clear the component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Blank,
    Text(String),
    Date(NaiveDate),
}

impl DateInput {
    /// Parses with the process-wide parser.
    pub fn parse(&self) -> DateTimeResult<Option<NaiveDate>> {
        self.parse_with(date_time_parser())
    }

    pub fn parse_with(&self, parser: &dyn DateTimeParser) -> DateTimeResult<Option<NaiveDate>> {
        match self {
            Self::Blank => Ok(None),
            Self::Text(text) if is_blank(text) => Ok(None),
            Self::Text(text) => parser.parse_date(text).map(Some),
            Self::Date(date) => Ok(Some(*date)),
        }
    }
}

/// Value assigned to the time component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeInput {
    Blank,
    Text(String),
    Time(NaiveTime),
}

impl TimeInput {
    /// Parses with the process-wide parser.
    pub fn parse(&self) -> DateTimeResult<Option<NaiveTime>> {
        self.parse_with(date_time_parser())
    }

    pub fn parse_with(&self, parser: &dyn DateTimeParser) -> DateTimeResult<Option<NaiveTime>> {
        match self {
            Self::Blank => Ok(None),
            Self::Text(text) if is_blank(text) => Ok(None),
            Self::Text(text) => parser.parse_time(text).map(Some),
            Self::Time(time) => Ok(Some(*time)),
        }
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<&str>> for DateInput {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Blank, Self::from)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<Option<NaiveDate>> for DateInput {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(Self::Blank, Self::Date)
    }
}

impl From<&str> for TimeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<&str>> for TimeInput {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Blank, Self::from)
    }
}

impl From<NaiveTime> for TimeInput {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<Option<NaiveTime>> for TimeInput {
    fn from(value: Option<NaiveTime>) -> Self {
        value.map_or(Self::Blank, Self::Time)
    }
}
