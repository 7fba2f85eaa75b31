//! Declaration-time table of date/time attributes for one host type.

use chrono_tz::Tz;
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use super::accessor::Accessor;
use super::binder::AttributeBinder;
use super::host::DateTimeHost;
use super::validation::ValidationErrors;
use crate::container::{
    format_date, format_time, parse_timestamp, DateInput, DateTimeParser, TimeInput,
};
use crate::error::{DateTimeError, DateTimeResult};
use crate::zone::TimeZoneSpec;

/// Options shared by the attributes of one `declare` call.
pub struct AttributeOptions<H> {
    time_zone: Option<TimeZoneSpec<H>>,
    parser: Option<Arc<dyn DateTimeParser>>,
}

impl<H> AttributeOptions<H> {
    pub fn new() -> Self {
        Self {
            time_zone: None,
            parser: None,
        }
    }

    /// Declares the zone the attributes are read and written in.
    pub fn time_zone(mut self, spec: impl Into<TimeZoneSpec<H>>) -> Self {
        self.time_zone = Some(spec.into());
        self
    }

    /// Parses date and time text of these attributes with `parser`.
    pub fn parser(mut self, parser: impl DateTimeParser + 'static) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }
}

impl<H> Default for AttributeOptions<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Debug for AttributeOptions<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeOptions")
            .field("time_zone", &self.time_zone)
            .field("custom_parser", &self.parser.is_some())
            .finish()
    }
}

/// Attribute declaration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    EmptyAttributeName,
    DuplicateAttribute(String),
    /// A generated accessor name is already taken by another attribute.
    AccessorCollision(String),
}

impl Display for DeclarationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAttributeName => write!(f, "attribute name must not be empty"),
            Self::DuplicateAttribute(name) => {
                write!(f, "date/time attribute already declared: {name}")
            }
            Self::AccessorCollision(field) => {
                write!(f, "generated accessor collides with an existing one: {field}")
            }
        }
    }
}

impl Error for DeclarationError {}

/// Bound accessors of every date/time attribute declared on a host type.
///
/// Built once; the field table maps each generated accessor name to its
/// attribute and accessor kind.
pub struct DateTimeAttributes<H> {
    binders: Vec<AttributeBinder<H>>,
    fields: BTreeMap<String, (usize, Accessor)>,
}

impl<H> DateTimeAttributes<H> {
    pub fn new() -> Self {
        Self {
            binders: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Declares `attributes` with shared `options`.
    ///
    /// The call is atomic: on error no attribute of this call is added.
    pub fn declare<I, S>(
        &mut self,
        attributes: I,
        options: AttributeOptions<H>,
    ) -> Result<(), DeclarationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = attributes
            .into_iter()
            .map(|name| name.into().trim().to_string())
            .collect();

        let mut pending: BTreeMap<String, (usize, Accessor)> = BTreeMap::new();
        for (offset, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(DeclarationError::EmptyAttributeName);
            }
            if self.binder(name).is_some()
                || pending.get(name).is_some_and(|(_, kind)| *kind == Accessor::Combined)
            {
                return Err(DeclarationError::DuplicateAttribute(name.clone()));
            }
            for accessor in Accessor::ALL {
                let field = accessor.field_name(name);
                if self.fields.contains_key(&field) || pending.contains_key(&field) {
                    return Err(DeclarationError::AccessorCollision(field));
                }
                pending.insert(field, (self.binders.len() + offset, accessor));
            }
        }

        for name in names {
            info!(
                "event=attribute_declare module=attribute status=ok attribute={} time_zone={:?}",
                name, options.time_zone
            );
            self.binders.push(
                AttributeBinder::new(name, options.time_zone.clone())
                    .with_parser(options.parser.clone()),
            );
        }
        self.fields.append(&mut pending);
        Ok(())
    }

    /// Builds a table with one `declare` call.
    pub fn declared<I, S>(
        attributes: I,
        options: AttributeOptions<H>,
    ) -> Result<Self, DeclarationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        table.declare(attributes, options)?;
        Ok(table)
    }

    pub fn binder(&self, attribute: &str) -> Option<&AttributeBinder<H>> {
        match self.fields.get(attribute) {
            Some((index, Accessor::Combined)) => self.binders.get(*index),
            _ => None,
        }
    }

    /// Binders in declaration order.
    pub fn binders(&self) -> impl Iterator<Item = &AttributeBinder<H>> {
        self.binders.iter()
    }

    /// Every generated accessor name, sorted.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn resolve_field(&self, field: &str) -> Option<(&AttributeBinder<H>, Accessor)> {
        let (index, accessor) = self.fields.get(field)?;
        self.binders.get(*index).map(|binder| (binder, *accessor))
    }

    pub fn len(&self) -> usize {
        self.binders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }
}

impl<H: DateTimeHost> DateTimeAttributes<H> {
    /// Assigns text to a generated field, as a form submission would.
    ///
    /// The combined field takes RFC 3339 text; blank or `None` clears it.
    ///
    /// # Errors
    /// - `UnknownField` when no declared attribute generates `field`.
    /// - Parse or zone errors of the strict setters; the raw `_value`
    ///   setters never fail.
    pub fn assign(&self, host: &mut H, field: &str, value: Option<&str>) -> DateTimeResult<()> {
        let (binder, accessor) = self
            .resolve_field(field)
            .ok_or_else(|| DateTimeError::UnknownField(field.to_string()))?;
        let present = value.filter(|text| !text.trim().is_empty());
        match accessor {
            Accessor::Combined => {
                let combined = present
                    .map(|text| parse_timestamp(text).map(|value| value.with_timezone(&Tz::UTC)))
                    .transpose()?;
                binder.set(host, combined)
            }
            Accessor::Date => binder.set_date(host, DateInput::from(value)).map(|_| ()),
            Accessor::Time => binder.set_time(host, TimeInput::from(value)).map(|_| ()),
            Accessor::TimeZone => binder
                .set_time_zone(host, present.map(TimeZoneSpec::from))
                .map(|_| ()),
            Accessor::DateValue => {
                binder.set_date_value(host, value);
                Ok(())
            }
            Accessor::TimeValue => {
                binder.set_time_value(host, value);
                Ok(())
            }
        }
    }

    /// Reads a generated field as display text.
    pub fn read(&self, host: &mut H, field: &str) -> DateTimeResult<Option<String>> {
        let (binder, accessor) = self
            .resolve_field(field)
            .ok_or_else(|| DateTimeError::UnknownField(field.to_string()))?;
        match accessor {
            Accessor::Combined => Ok(binder.get(host).map(|value| value.to_rfc3339())),
            Accessor::Date => Ok(binder.date(host)?.map(format_date)),
            Accessor::Time => Ok(binder.time(host)?.map(format_time)),
            Accessor::TimeZone => Ok(Some(binder.time_zone(host)?.name().to_string())),
            Accessor::DateValue => binder.date_value(host),
            Accessor::TimeValue => binder.time_value(host),
        }
    }

    /// Pre-validation pass: applies the clear rule to every attribute.
    pub fn before_validation(&self, host: &mut H) -> DateTimeResult<()> {
        for binder in &self.binders {
            binder.apply_clear_rule(host)?;
        }
        Ok(())
    }

    /// Runs the clear rule, then the validity check, over every attribute.
    pub fn validate(&self, host: &mut H) -> DateTimeResult<ValidationErrors> {
        self.before_validation(host)?;
        let mut errors = ValidationErrors::new();
        for binder in &self.binders {
            binder.validate(host, &mut errors);
        }
        Ok(errors)
    }
}

impl<H> Default for DateTimeAttributes<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Debug for DateTimeAttributes<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateTimeAttributes")
            .field("binders", &self.binders)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeOptions, DateTimeAttributes, DeclarationError};
    use crate::attribute::accessor::Accessor;

    struct Plain;

    #[test]
    fn builds_field_table_for_each_attribute() {
        let table = DateTimeAttributes::<Plain>::declared(
            ["starts_at", "ends_at"],
            AttributeOptions::new().time_zone("UTC"),
        )
        .expect("declaration");

        assert_eq!(table.len(), 2);
        assert_eq!(table.field_names().count(), 12);
        let (binder, accessor) = table
            .resolve_field("ends_at_time_value")
            .expect("generated field");
        assert_eq!(binder.name(), "ends_at");
        assert_eq!(accessor, Accessor::TimeValue);
        assert!(table.binder("ends_at_time").is_none());
        assert!(binder.time_zone_spec().is_some());
    }

    #[test]
    fn rejects_empty_and_duplicate_attributes() {
        let mut table = DateTimeAttributes::<Plain>::new();
        assert_eq!(
            table
                .declare([" "], AttributeOptions::new())
                .expect_err("empty name must fail"),
            DeclarationError::EmptyAttributeName
        );

        table
            .declare(["starts_at"], AttributeOptions::new())
            .expect("first declaration");
        assert_eq!(
            table
                .declare(["starts_at"], AttributeOptions::new())
                .expect_err("duplicate must fail"),
            DeclarationError::DuplicateAttribute("starts_at".to_string())
        );
        assert_eq!(
            table
                .declare(["due", "due"], AttributeOptions::new())
                .expect_err("duplicate within one call must fail"),
            DeclarationError::DuplicateAttribute("due".to_string())
        );
    }

    #[test]
    fn rejects_generated_name_collisions_atomically() {
        let mut table = DateTimeAttributes::<Plain>::new();
        table
            .declare(["starts_at"], AttributeOptions::new())
            .expect("first declaration");

        let err = table
            .declare(["ends_at", "starts_at_date"], AttributeOptions::new())
            .expect_err("collision must fail");
        assert_eq!(
            err,
            DeclarationError::AccessorCollision("starts_at_date".to_string())
        );
        assert_eq!(table.len(), 1);
        assert!(table.binder("ends_at").is_none());
    }
}
