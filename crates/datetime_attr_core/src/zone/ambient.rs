//! Ambient zone slot scoped to the calling thread.

use chrono_tz::Tz;
use log::debug;
use once_cell::sync::OnceCell;
use std::cell::Cell;
use std::marker::PhantomData;

use super::spec::parse_zone_name;

static DEFAULT_ZONE: OnceCell<Tz> = OnceCell::new();

thread_local! {
    static AMBIENT_ZONE: Cell<Option<Tz>> = const { Cell::new(None) };
}

/// Sets the process-wide default zone used when no ambient zone is active.
///
/// # Invariants
/// - Calling this repeatedly with the same zone is idempotent.
/// - Switching to a different zone after the first call is rejected.
///
/// # Errors
/// - Returns an error when `name` is not a known IANA zone.
/// - Returns an error when a different default is already configured.
pub fn configure_default_time_zone(name: &str) -> Result<Tz, String> {
    let zone = parse_zone_name(name).map_err(|err| err.to_string())?;
    let active = *DEFAULT_ZONE.get_or_init(|| zone);
    if active != zone {
        return Err(format!(
            "default time zone already configured as `{}`; refusing to switch to `{}`",
            active.name(),
            zone.name()
        ));
    }
    Ok(active)
}

/// Returns the configured process default zone, or UTC when unset.
pub fn default_time_zone() -> Tz {
    DEFAULT_ZONE.get().copied().unwrap_or(Tz::UTC)
}

/// Returns the ambient zone of the calling thread.
///
/// Falls back to [`default_time_zone`] outside any [`ZoneScope`].
pub fn current_time_zone() -> Tz {
    AMBIENT_ZONE
        .with(Cell::get)
        .unwrap_or_else(default_time_zone)
}

/// Guard that makes one zone ambient until it is dropped.
///
/// Scopes nest: dropping the inner guard brings back the outer zone. The
/// guard is bound to the thread that created it.
#[derive(Debug)]
#[must_use = "the previous zone is restored as soon as the scope is dropped"]
pub struct ZoneScope {
    zone: Tz,
    previous: Option<Tz>,
    _thread_bound: PhantomData<*const ()>,
}

impl ZoneScope {
    pub fn enter(zone: Tz) -> Self {
        let previous = AMBIENT_ZONE.with(|slot| slot.replace(Some(zone)));
        debug!(
            "event=zone_scope module=zone status=enter zone={} previous={}",
            zone.name(),
            previous.map_or("none", |tz| tz.name())
        );
        Self {
            zone,
            previous,
            _thread_bound: PhantomData,
        }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }
}

impl Drop for ZoneScope {
    fn drop(&mut self) {
        AMBIENT_ZONE.with(|slot| slot.set(self.previous));
        debug!(
            "event=zone_scope module=zone status=restore zone={} restored={}",
            self.zone.name(),
            self.previous.map_or("none", |tz| tz.name())
        );
    }
}
