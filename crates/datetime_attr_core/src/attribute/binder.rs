//! Per-attribute orchestration of zone resolution, container and raw input.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use log::{debug, info, warn};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use super::accessor::Accessor;
use super::host::{DateTimeHost, RawInput};
use super::validation::{ValidationErrors, ValidationFailure};
use crate::container::{
    date_time_parser, format_date, format_time, DateInput, DateTimeContainer, DateTimeParser,
    TimeInput, Timestamp,
};
use crate::error::DateTimeResult;
use crate::zone::{current_time_zone, enter_time_zone, TimeZoneSpec};

/// Accessor surface of one declared date/time attribute.
///
/// Every operation resolves the declared zone against the host first and
/// keeps it ambient for the duration of the call. The stored combined value
/// is re-read on every call, so writes that bypass the binder are picked up.
pub struct AttributeBinder<H> {
    name: String,
    time_zone: Option<TimeZoneSpec<H>>,
    parser: Option<Arc<dyn DateTimeParser>>,
}

impl<H> AttributeBinder<H> {
    pub fn new(name: impl Into<String>, time_zone: Option<TimeZoneSpec<H>>) -> Self {
        Self {
            name: name.into(),
            time_zone,
            parser: None,
        }
    }

    /// Parses date and time text with `parser` instead of the process-wide one.
    pub fn with_parser(mut self, parser: Option<Arc<dyn DateTimeParser>>) -> Self {
        self.parser = parser;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn time_zone_spec(&self) -> Option<&TimeZoneSpec<H>> {
        self.time_zone.as_ref()
    }

    pub fn field_name(&self, accessor: Accessor) -> String {
        accessor.field_name(&self.name)
    }

    pub fn parser(&self) -> &dyn DateTimeParser {
        match &self.parser {
            Some(parser) => &**parser,
            None => date_time_parser(),
        }
    }
}

impl<H: DateTimeHost> AttributeBinder<H> {
    /// `<attr>`: the stored combined value.
    pub fn get(&self, host: &H) -> Option<Timestamp> {
        host.read_timestamp(&self.name)
    }

    /// `<attr>=`: replaces the combined value, expressed in the bound zone.
    pub fn set(&self, host: &mut H, value: Option<Timestamp>) -> DateTimeResult<()> {
        let combined = self.with_container(host, |container| {
            container.set_date_time(value);
            Ok(container.date_time())
        })?;
        self.write_back(host, combined);
        Ok(())
    }

    /// `<attr>_date`
    pub fn date(&self, host: &mut H) -> DateTimeResult<Option<NaiveDate>> {
        self.with_container(host, |container| Ok(container.date()))
    }

    /// `<attr>_time`
    pub fn time(&self, host: &mut H) -> DateTimeResult<Option<NaiveTime>> {
        self.with_container(host, |container| Ok(container.time()))
    }

    /// `<attr>_time_zone`
    pub fn time_zone(&self, host: &mut H) -> DateTimeResult<Tz> {
        self.with_container(host, |container| Ok(container.zone()))
    }

    /// `<attr>_date=`: sets the date component and stores the recomposed value.
    ///
    /// # Errors
    /// - `DateParse` for malformed non-blank input.
    /// - `InvalidSpecification` when the declared zone does not resolve.
    pub fn set_date(
        &self,
        host: &mut H,
        input: impl Into<DateInput>,
    ) -> DateTimeResult<Option<NaiveDate>> {
        let date = input.into().parse_with(self.parser())?;
        let (date, combined) = self.with_container(host, |container| {
            let date = container.set_date(date)?;
            Ok((date, container.date_time()))
        })?;
        self.write_back(host, combined);
        Ok(date)
    }

    /// `<attr>_time=`: sets the time component and stores the recomposed value.
    ///
    /// # Errors
    /// - `TimeParse` for malformed non-blank input.
    /// - `InvalidSpecification` when the declared zone does not resolve.
    pub fn set_time(
        &self,
        host: &mut H,
        input: impl Into<TimeInput>,
    ) -> DateTimeResult<Option<NaiveTime>> {
        let time = input.into().parse_with(self.parser())?;
        let (time, combined) = self.with_container(host, |container| {
            let time = container.set_time(time)?;
            Ok((time, container.date_time()))
        })?;
        self.write_back(host, combined);
        Ok(time)
    }

    /// `<attr>_time_zone=`: re-expresses the same instant in `spec` and
    /// stores it.
    ///
    /// `None` is a no-op. With no declared zone the container keeps the new
    /// zone for later reads; with a declared zone, later reads go back to the
    /// declared one.
    pub fn set_time_zone(
        &self,
        host: &mut H,
        spec: Option<TimeZoneSpec<H>>,
    ) -> DateTimeResult<Option<Tz>> {
        let Some(spec) = spec else {
            return Ok(None);
        };
        let (zone, combined) = self.with_container_in(Some(&spec), host, |container| {
            Ok((container.zone(), container.date_time()))
        })?;
        host.date_time_state().attribute_mut(&self.name).pin_zone();
        self.write_back(host, combined);
        Ok(Some(zone))
    }

    /// `<attr>_date_value=`: records raw date text and applies it when it
    /// parses.
    ///
    /// Never fails: a malformed value is kept for redisplay and reported by
    /// [`AttributeBinder::validate`].
    pub fn set_date_value(&self, host: &mut H, raw: Option<&str>) {
        let parsed = DateInput::from(raw).parse_with(self.parser());
        if let Ok(date) = &parsed {
            if let Err(err) = self.set_date(host, *date) {
                warn!(
                    "event=raw_assign module=attribute status=error attribute={} field=date error={}",
                    self.name, err
                );
            }
        }
        host.date_time_state()
            .attribute_mut(&self.name)
            .record_raw_date(RawInput::new(raw, parsed.map(|_| ())));
    }

    /// `<attr>_time_value=`: records raw time text and applies it when it
    /// parses.
    pub fn set_time_value(&self, host: &mut H, raw: Option<&str>) {
        let parsed = TimeInput::from(raw).parse_with(self.parser());
        if let Ok(time) = &parsed {
            if let Err(err) = self.set_time(host, *time) {
                warn!(
                    "event=raw_assign module=attribute status=error attribute={} field=time error={}",
                    self.name, err
                );
            }
        }
        host.date_time_state()
            .attribute_mut(&self.name)
            .record_raw_time(RawInput::new(raw, parsed.map(|_| ())));
    }

    /// `<attr>_date_value`: the recorded raw text, else the stored date in
    /// canonical form.
    pub fn date_value(&self, host: &mut H) -> DateTimeResult<Option<String>> {
        let raw = host
            .date_time_state()
            .attribute(&self.name)
            .and_then(|state| state.raw_date())
            .and_then(RawInput::text)
            .map(str::to_string);
        match raw {
            Some(text) => Ok(Some(text)),
            None => Ok(self.date(host)?.map(format_date)),
        }
    }

    /// `<attr>_time_value`: the recorded raw text, else the stored time in
    /// canonical form.
    pub fn time_value(&self, host: &mut H) -> DateTimeResult<Option<String>> {
        let raw = host
            .date_time_state()
            .attribute(&self.name)
            .and_then(|state| state.raw_time())
            .and_then(RawInput::text)
            .map(str::to_string);
        match raw {
            Some(text) => Ok(Some(text)),
            None => Ok(self.time(host)?.map(format_time)),
        }
    }

    /// Clear rule, run before validation: once a raw sub-setter ran and both
    /// raw inputs are blank, the combined value becomes absent.
    ///
    /// Returns whether the value was cleared.
    pub fn apply_clear_rule(&self, host: &mut H) -> DateTimeResult<bool> {
        let wants_clear = host
            .date_time_state()
            .attribute(&self.name)
            .is_some_and(|state| state.wants_clear());
        if wants_clear {
            self.set(host, None)?;
            info!(
                "event=clear_rule module=attribute status=ok attribute={}",
                self.name
            );
        }
        Ok(wants_clear)
    }

    /// Validity check of the raw inputs. Blank raw values are always valid.
    pub fn validate(&self, host: &mut H, errors: &mut ValidationErrors) {
        let Some(state) = host.date_time_state().attribute(&self.name) else {
            return;
        };
        if state
            .raw_date()
            .and_then(RawInput::parse_error)
            .is_some()
        {
            errors.add(&self.name, ValidationFailure::InvalidDate);
        }
        if state
            .raw_time()
            .and_then(RawInput::parse_error)
            .is_some()
        {
            errors.add(&self.name, ValidationFailure::InvalidTime);
        }
    }

    fn with_container<T>(
        &self,
        host: &mut H,
        op: impl FnOnce(&mut DateTimeContainer) -> DateTimeResult<T>,
    ) -> DateTimeResult<T> {
        self.with_container_in(self.time_zone.as_ref(), host, op)
    }

    // The resolved zone stays ambient until this returns, on every path.
    fn with_container_in<T>(
        &self,
        spec: Option<&TimeZoneSpec<H>>,
        host: &mut H,
        op: impl FnOnce(&mut DateTimeContainer) -> DateTimeResult<T>,
    ) -> DateTimeResult<T> {
        let resolved = enter_time_zone(spec, host)?;
        let stored = host.read_timestamp(&self.name);
        let state = host.date_time_state().attribute_mut(&self.name);
        let pinned = state.zone_pinned();
        let container = state.container_or_insert(stored, resolved.effective_zone());
        if container.sync_value(stored) {
            debug!(
                "event=container_resync module=attribute status=ok attribute={} present={}",
                self.name,
                stored.is_some()
            );
        }
        match resolved.zone() {
            Some(zone) => {
                container.in_zone(zone);
            }
            None if !pinned => {
                container.in_zone(current_time_zone());
            }
            None => {}
        }
        op(container)
    }

    fn write_back(&self, host: &mut H, combined: Option<Timestamp>) {
        debug!(
            "event=attribute_write module=attribute status=ok attribute={} present={}",
            self.name,
            combined.is_some()
        );
        host.write_timestamp(&self.name, combined);
    }
}

impl<H> Clone for AttributeBinder<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            time_zone: self.time_zone.clone(),
            parser: self.parser.clone(),
        }
    }
}

impl<H> Debug for AttributeBinder<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeBinder")
            .field("name", &self.name)
            .field("time_zone", &self.time_zone)
            .field("custom_parser", &self.parser.is_some())
            .finish()
    }
}

