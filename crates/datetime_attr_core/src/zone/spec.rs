//! Declared zone specs and their resolution against a host record.

use chrono_tz::{Tz, TZ_VARIANTS};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use super::ambient::{current_time_zone, default_time_zone, ZoneScope};
use crate::error::{DateTimeError, DateTimeResult};

/// Deferred zone rule evaluated against one host record per operation.
///
/// Returns a zone name, or `None` to fall back to the process default zone.
pub type ZoneRule<H> = Arc<dyn Fn(&H) -> Option<String> + Send + Sync>;

/// Named zone lookups a host record can answer.
///
/// Backs [`TimeZoneSpec::Lookup`]: the key usually names a field on the
/// record that stores a zone name.
pub trait ZoneLookup {
    fn lookup_time_zone(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Declared time zone of a date/time attribute.
pub enum TimeZoneSpec<H> {
    /// A concrete zone.
    Fixed(Tz),
    /// An IANA zone name, checked when resolved.
    Named(String),
    /// A closure computing the zone name from the host record.
    Rule(ZoneRule<H>),
    /// A zone name read from the host through [`ZoneLookup`].
    Lookup(String),
}

impl<H> TimeZoneSpec<H> {
    pub fn rule(rule: impl Fn(&H) -> Option<String> + Send + Sync + 'static) -> Self {
        Self::Rule(Arc::new(rule))
    }

    pub fn lookup(key: impl Into<String>) -> Self {
        Self::Lookup(key.into())
    }
}

impl<H: ZoneLookup> TimeZoneSpec<H> {
    /// Resolves this spec into a concrete zone for `host`.
    ///
    /// # Errors
    /// - `InvalidSpecification` when the named, computed or looked-up zone
    ///   name is blank or unknown.
    pub fn resolve(&self, host: &H) -> DateTimeResult<Tz> {
        match self {
            Self::Fixed(zone) => Ok(*zone),
            Self::Named(name) => parse_zone_name(name),
            Self::Rule(rule) => resolve_deferred(rule(host)),
            Self::Lookup(key) => resolve_deferred(host.lookup_time_zone(key)),
        }
    }
}

fn resolve_deferred(name: Option<String>) -> DateTimeResult<Tz> {
    match name {
        Some(name) => parse_zone_name(&name),
        None => Ok(default_time_zone()),
    }
}

impl<H> Clone for TimeZoneSpec<H> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(zone) => Self::Fixed(*zone),
            Self::Named(name) => Self::Named(name.clone()),
            Self::Rule(rule) => Self::Rule(Arc::clone(rule)),
            Self::Lookup(key) => Self::Lookup(key.clone()),
        }
    }
}

impl<H> Debug for TimeZoneSpec<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(zone) => f.debug_tuple("Fixed").field(&zone.name()).finish(),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Rule(_) => f.write_str("Rule(..)"),
            Self::Lookup(key) => f.debug_tuple("Lookup").field(key).finish(),
        }
    }
}

impl<H> From<Tz> for TimeZoneSpec<H> {
    fn from(value: Tz) -> Self {
        Self::Fixed(value)
    }
}

impl<H> From<&str> for TimeZoneSpec<H> {
    fn from(value: &str) -> Self {
        Self::Named(value.to_string())
    }
}

impl<H> From<String> for TimeZoneSpec<H> {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}

/// Parses an IANA zone name, falling back to a case-insensitive match.
pub fn parse_zone_name(name: &str) -> DateTimeResult<Tz> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DateTimeError::InvalidSpecification(name.to_string()));
    }
    if let Ok(zone) = trimmed.parse::<Tz>() {
        return Ok(zone);
    }
    TZ_VARIANTS
        .iter()
        .find(|zone| zone.name().eq_ignore_ascii_case(trimmed))
        .copied()
        .ok_or_else(|| DateTimeError::InvalidSpecification(trimmed.to_string()))
}

/// Zone resolved for one operation, ambient until dropped.
///
/// `zone()` is `None` when the attribute declares no zone; in that case the
/// ambient slot is left untouched.
#[derive(Debug)]
#[must_use = "the ambient zone is restored as soon as this value is dropped"]
pub struct ResolvedZone {
    scope: Option<ZoneScope>,
}

impl ResolvedZone {
    pub fn zone(&self) -> Option<Tz> {
        self.scope.as_ref().map(ZoneScope::zone)
    }

    /// The declared zone, or the ambient zone when none is declared.
    pub fn effective_zone(&self) -> Tz {
        self.zone().unwrap_or_else(current_time_zone)
    }
}

/// Resolves `spec` against `host` and makes the result ambient.
///
/// The returned guard holds no borrow of `host`, so the caller may mutate
/// the record while the zone is in effect.
pub fn enter_time_zone<H: ZoneLookup>(
    spec: Option<&TimeZoneSpec<H>>,
    host: &H,
) -> DateTimeResult<ResolvedZone> {
    let scope = match spec {
        Some(spec) => Some(ZoneScope::enter(spec.resolve(host)?)),
        None => None,
    };
    Ok(ResolvedZone { scope })
}

/// Runs `op` with the zone of `spec` ambient, restoring the previous zone
/// afterward whatever `op` returns.
pub fn in_time_zone<H: ZoneLookup, T>(
    spec: Option<&TimeZoneSpec<H>>,
    host: &H,
    op: impl FnOnce(Option<Tz>) -> T,
) -> DateTimeResult<T> {
    let resolved = enter_time_zone(spec, host)?;
    Ok(op(resolved.zone()))
}
