//! Validation failures collected per attribute.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Reason a raw sub-field input failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    InvalidDate,
    InvalidTime,
}

impl ValidationFailure {
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidDate => "is not a valid date",
            Self::InvalidTime => "is not a valid time",
        }
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Validation failures keyed by attribute name, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: BTreeMap<String, Vec<ValidationFailure>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, attribute: &str, failure: ValidationFailure) {
        self.entries
            .entry(attribute.to_string())
            .or_default()
            .push(failure);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of failures across attributes.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn get(&self, attribute: &str) -> &[ValidationFailure] {
        self.entries.get(attribute).map_or(&[][..], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ValidationFailure)> {
        self.entries.iter().flat_map(|(attribute, failures)| {
            failures
                .iter()
                .map(move |failure| (attribute.as_str(), *failure))
        })
    }

    /// Messages such as `starts_at is not a valid date`.
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .map(|(attribute, failure)| format!("{attribute} {failure}"))
            .collect()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_messages().join("; "))
    }
}
