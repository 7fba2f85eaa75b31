//! Date/time attribute core.
//!
//! Augments timestamp fields of a host record with separately settable date,
//! time and zone accessors. Each operation resolves the attribute's declared
//! zone against the host and keeps it ambient for the call.

pub mod attribute;
pub mod container;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod zone;

pub use attribute::{
    Accessor, AttributeBinder, AttributeOptions, AttributeState, DateTimeAttributes,
    DateTimeHost, DateTimeState, DeclarationError, RawInput, ValidationErrors, ValidationFailure,
};
pub use container::{
    compose, configure_parser, date_time_parser, DateInput, DateTimeContainer, DateTimeParser,
    FormatListParser, TimeInput, Timestamp,
};
pub use error::{DateTimeError, DateTimeResult};
pub use logging::{active_log_settings, default_log_level, init_logging, LogSettings};
pub use model::event::{Event, EventError, EventId};
pub use model::wire::{format_wire, parse_wire};
pub use service::form::{submit_event_form, submit_form, FormSubmission};
pub use zone::{
    configure_default_time_zone, current_time_zone, default_time_zone, enter_time_zone,
    in_time_zone, parse_zone_name, ResolvedZone, TimeZoneSpec, ZoneLookup, ZoneRule, ZoneScope,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
