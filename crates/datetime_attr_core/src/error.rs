//! Errors raised by zone resolution, component parsing and accessor dispatch.
//!
//! # Invariants
//! - Every variant is recoverable: callers fix the input and retry.
//! - Parse variants keep the offending input verbatim for diagnostics.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DateTimeResult<T> = Result<T, DateTimeError>;

/// Failure of one date/time attribute operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    /// Non-blank input that is not a recognizable calendar date.
    DateParse { input: String },
    /// Non-blank input that is not a recognizable time of day.
    TimeParse { input: String },
    /// Zone spec that does not name a zone in the IANA database.
    InvalidSpecification(String),
    /// Combined-value text that is not an RFC 3339 timestamp.
    TimestampParse { input: String },
    /// Field name that no declared attribute generates.
    UnknownField(String),
}

impl DateTimeError {
    /// Whether this failure comes from malformed date or time input.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::DateParse { .. } | Self::TimeParse { .. })
    }
}

impl Display for DateTimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateParse { input } => write!(f, "cannot parse `{input}` as a date"),
            Self::TimeParse { input } => write!(f, "cannot parse `{input}` as a time"),
            Self::InvalidSpecification(value) => {
                write!(f, "expected a time zone, got `{value}`")
            }
            Self::TimestampParse { input } => {
                write!(f, "cannot parse `{input}` as an RFC 3339 timestamp")
            }
            Self::UnknownField(name) => write!(f, "unknown date/time field: {name}"),
        }
    }
}

impl Error for DateTimeError {}
