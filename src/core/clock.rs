//! Wall-clock access.
//!
//! All date logic runs on server-local naive date-times. The [`Clock`] trait
//! lets tests pin "now" to a given instant and move it across midnight.

use std::sync::Mutex;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Seconds in one calendar day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    /// Current server-local date-time.
    fn now(&self) -> NaiveDateTime;

    /// Current server-local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the operating system's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and simulations.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    /// Create a clock frozen at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, now: NaiveDateTime) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard = now;
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Whole seconds from `now` until the next local midnight.
///
/// Fractional seconds are truncated. The result is always in
/// `[0, SECONDS_PER_DAY)`: at exactly midnight the new day has begun and the
/// countdown reports the last full second of the day instead of a full day.
pub fn seconds_until_midnight(now: NaiveDateTime) -> u64 {
    let next_midnight = match now.date().succ_opt().and_then(|d| d.and_hms_opt(0, 0, 0)) {
        Some(midnight) => midnight,
        // End of chrono's representable range; nothing sensible to count to.
        None => return 0,
    };

    let remaining = (next_midnight - now).num_seconds().max(0) as u64;
    remaining.min(SECONDS_PER_DAY - 1)
}
