//! Wall-clock instants and the injectable clock.
//!
//! Every validation entry point takes an explicit [`Timestamp`]. Code that
//! wants "now" asks a [`Clock`] once and passes the value down, so a single
//! decision never straddles two clock readings.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Seconds in one minute.
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Seconds in one day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// An instant as whole seconds since the Unix epoch (UTC).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Self = Self(0);

    /// Create from seconds since the Unix epoch.
    #[must_use]
    pub const fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Seconds since the Unix epoch.
    #[must_use]
    pub const fn as_unix_seconds(self) -> i64 {
        self.0
    }

    /// Read the system clock.
    ///
    /// A clock set before 1970 reads as negative seconds.
    #[must_use]
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Whole seconds between the Unix epoch and `t`, negative before 1970.
    #[must_use]
    pub fn from_system_time(t: SystemTime) -> Self {
        let seconds = match t.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
            Err(before) => {
                i64::try_from(before.duration().as_secs()).map_or(i64::MIN, i64::saturating_neg)
            }
        };
        Self(seconds)
    }

    /// `self + seconds`, saturating at the `i64` bounds.
    #[must_use]
    pub const fn saturating_add_seconds(self, seconds: i64) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    /// `self - seconds`, saturating at the `i64` bounds.
    #[must_use]
    pub const fn saturating_sub_seconds(self, seconds: i64) -> Self {
        Self(self.0.saturating_sub(seconds))
    }

    /// `self + minutes`, saturating.
    #[must_use]
    pub const fn add_minutes(self, minutes: i64) -> Self {
        self.saturating_add_seconds(minutes.saturating_mul(SECONDS_PER_MINUTE))
    }

    /// `self + days`, saturating.
    #[must_use]
    pub const fn add_days(self, days: i64) -> Self {
        self.saturating_add_seconds(days.saturating_mul(SECONDS_PER_DAY))
    }

    /// Signed seconds from `earlier` to `self` (negative if `earlier` is later).
    #[must_use]
    pub const fn seconds_since(self, earlier: Self) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whole days from `from` to `to`, rounded half away from zero.
///
/// 11 hours rounds to 0 days, 12 and 13 hours round to 1, -13 hours to -1.
// SECONDS_PER_DAY is a non-zero constant and the magnitude is shifted by at
// most half a day after saturation.
#[allow(clippy::arithmetic_side_effects)]
#[must_use]
pub const fn rounded_days_between(from: Timestamp, to: Timestamp) -> i64 {
    let seconds = to.seconds_since(from);
    let half_day = SECONDS_PER_DAY / 2;
    if seconds >= 0 {
        seconds.saturating_add(half_day) / SECONDS_PER_DAY
    } else {
        -(seconds.saturating_neg().saturating_add(half_day) / SECONDS_PER_DAY)
    }
}

// ── Clocks ─────────────────────────────────────────────────────────

/// Source of the current time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// The operating system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock frozen at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

// ── Tests ──────────────────────────────────────────────────────────
