//! Pluggable parsing of date and time text.
//!
//! # Responsibility
//! - Define the parser seam used by component setters.
//! - Hold the process-wide parser, configured at most once.
//!
//! # Invariants
//! - Without configuration the format-list parser is used.
//! - A configured parser cannot be replaced for the life of the process.

use chrono::{NaiveDate, NaiveTime};
use log::info;
use once_cell::sync::OnceCell;

use super::parse::{parse_date, parse_time};
use crate::error::DateTimeResult;

/// Turns non-blank user text into a date or a time of day.
///
/// Implementations report failures as `DateParse` / `TimeParse` carrying the
/// input verbatim. Blank text never reaches the parser.
pub trait DateTimeParser: Send + Sync {
    fn parse_date(&self, input: &str) -> DateTimeResult<NaiveDate>;

    fn parse_time(&self, input: &str) -> DateTimeResult<NaiveTime>;
}

/// Default parser: tries chrono format lists in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatListParser;

impl DateTimeParser for FormatListParser {
    fn parse_date(&self, input: &str) -> DateTimeResult<NaiveDate> {
        parse_date(input)
    }

    fn parse_time(&self, input: &str) -> DateTimeResult<NaiveTime> {
        parse_time(input)
    }
}

static DEFAULT_PARSER: FormatListParser = FormatListParser;
static CONFIGURED_PARSER: OnceCell<Box<dyn DateTimeParser>> = OnceCell::new();

/// Installs the process-wide parser.
///
/// # Errors
/// - Returns an error when a parser is already configured.
pub fn configure_parser(parser: impl DateTimeParser + 'static) -> Result<(), String> {
    CONFIGURED_PARSER
        .set(Box::new(parser))
        .map_err(|_| "date/time parser already configured; refusing to switch".to_string())?;
    info!("event=parser_configure module=container status=ok");
    Ok(())
}

/// The configured parser, or [`FormatListParser`] when none is set.
pub fn date_time_parser() -> &'static dyn DateTimeParser {
    match CONFIGURED_PARSER.get() {
        Some(parser) => &**parser,
        None => &DEFAULT_PARSER,
    }
}
