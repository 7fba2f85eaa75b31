//! Names of the accessors generated for one date/time attribute.

/// One generated accessor of a date/time attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Accessor {
    /// `<attr>`: the combined value.
    Combined,
    /// `<attr>_date`
    Date,
    /// `<attr>_time`
    Time,
    /// `<attr>_time_zone`
    TimeZone,
    /// `<attr>_date_value`: raw date text, tolerant of invalid input.
    DateValue,
    /// `<attr>_time_value`: raw time text, tolerant of invalid input.
    TimeValue,
}

impl Accessor {
    pub const ALL: [Accessor; 6] = [
        Self::Combined,
        Self::Date,
        Self::Time,
        Self::TimeZone,
        Self::DateValue,
        Self::TimeValue,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Combined => "",
            Self::Date => "_date",
            Self::Time => "_time",
            Self::TimeZone => "_time_zone",
            Self::DateValue => "_date_value",
            Self::TimeValue => "_time_value",
        }
    }

    pub fn field_name(self, attribute: &str) -> String {
        format!("{attribute}{}", self.suffix())
    }
}
