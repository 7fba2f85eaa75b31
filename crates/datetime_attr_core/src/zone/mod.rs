//! Time-zone specs, resolution, and the thread-scoped ambient zone.
//!
//! # Responsibility
//! - Turn a declared zone spec into a concrete IANA zone for one host record.
//! - Hold the ambient zone of the calling thread and restore it on scope exit.
//!
//! # Invariants
//! - Entering a zone always restores the previous ambient zone when the
//!   returned guard drops, including on early `?` returns and unwinding.
//! - An absent spec never touches the ambient slot.

mod ambient;
mod spec;

pub use ambient::{
    configure_default_time_zone, current_time_zone, default_time_zone, ZoneScope,
};
pub use spec::{
    enter_time_zone, in_time_zone, parse_zone_name, ResolvedZone, TimeZoneSpec, ZoneLookup,
    ZoneRule,
};
