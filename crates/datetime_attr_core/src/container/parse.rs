//! Lenient parsing of user-entered dates and times, plus canonical display.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{DateTimeError, DateTimeResult};

/// Display format used when no raw date input has been recorded.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";
/// Display format used when no raw time input has been recorded.
pub const CANONICAL_TIME_FORMAT: &str = "%H:%M";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%d %B %Y",
];

const TIME_FORMATS: &[&str] = &[
    "%H:%M",
    "%H:%M:%S%.f",
    "%I:%M %p",
    "%I:%M%p",
    "%I:%M:%S %p",
];

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// Whether `value` carries no input: empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn parse_date(input: &str) -> DateTimeResult<NaiveDate> {
    let trimmed = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| parse_date_time_text(trimmed).map(|value| value.date()))
        .ok_or_else(|| DateTimeError::DateParse {
            input: input.to_string(),
        })
}

pub fn parse_time(input: &str) -> DateTimeResult<NaiveTime> {
    let trimmed = input.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .or_else(|| parse_date_time_text(trimmed).map(|value| value.time()))
        .ok_or_else(|| DateTimeError::TimeParse {
            input: input.to_string(),
        })
}

/// Parses combined-value text such as `2024-03-10T14:30:00Z`.
pub fn parse_timestamp(input: &str) -> DateTimeResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(input.trim()).map_err(|_| DateTimeError::TimestampParse {
        input: input.to_string(),
    })
}

// Full timestamps typed into a date or time box keep their wall-clock part.
fn parse_date_time_text(trimmed: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(trimmed)
        .map(|value| value.naive_local())
        .ok()
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(CANONICAL_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_date, format_time, is_blank, parse_date, parse_time, parse_timestamp};
    use crate::error::DateTimeError;
    use chrono::{NaiveDate, NaiveTime};

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid test time")
    }

    #[test]
    fn blank_detection_ignores_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" 1 "));
    }

    #[test]
    fn parses_supported_date_shapes() {
        let expected = ymd(2024, 3, 10);
        for input in [
            "2024-03-10",
            " 2024-3-10 ",
            "2024/03/10",
            "10.03.2024",
            "March 10, 2024",
            "10 Mar 2024",
            "2024-03-10T14:30:00Z",
            "2024-03-10 14:30",
        ] {
            assert_eq!(parse_date(input).expect(input), expected, "input {input}");
        }
    }

    #[test]
    fn rejects_malformed_dates_verbatim() {
        for input in ["not-a-date", "2024-02-30", "10/03", "14:30"] {
            assert_eq!(
                parse_date(input).expect_err(input),
                DateTimeError::DateParse {
                    input: input.to_string()
                }
            );
        }
    }

    #[test]
    fn parses_supported_time_shapes() {
        assert_eq!(parse_time("14:30").expect("24h"), hm(14, 30));
        assert_eq!(parse_time("09:05:00").expect("seconds"), hm(9, 5));
        assert_eq!(parse_time("2:30 PM").expect("12h"), hm(14, 30));
        assert_eq!(parse_time("12:15am").expect("12h compact"), hm(0, 15));
        assert_eq!(
            parse_time("2024-03-10T07:45:00+01:00").expect("rfc3339"),
            hm(7, 45)
        );
        assert_eq!(
            parse_time("14:30:15.250").expect("fraction"),
            NaiveTime::from_hms_milli_opt(14, 30, 15, 250).expect("valid test time")
        );
    }

    #[test]
    fn rejects_malformed_times_verbatim() {
        for input in ["25:00", "lunch", "2024-03-10"] {
            assert_eq!(
                parse_time(input).expect_err(input),
                DateTimeError::TimeParse {
                    input: input.to_string()
                }
            );
        }
    }

    #[test]
    fn parses_rfc3339_timestamps_only() {
        let value = parse_timestamp("2024-03-10T14:30:00+02:00").expect("rfc3339");
        assert_eq!(value.offset().local_minus_utc(), 7200);
        assert!(matches!(
            parse_timestamp("2024-03-10").expect_err("date only"),
            DateTimeError::TimestampParse { .. }
        ));
    }

    #[test]
    fn formats_canonical_short_forms() {
        assert_eq!(format_date(ymd(2024, 3, 9)), "2024-03-09");
        assert_eq!(
            format_time(NaiveTime::from_hms_opt(7, 5, 59).expect("valid test time")),
            "07:05"
        );
    }
}
