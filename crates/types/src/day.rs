//! Day alignment.
//!
//! The ledger measures time in whole days since 1970-01-01. A moment is mapped
//! to a day by taking its absolute millisecond distance from the epoch and
//! rounding to the nearest day, halves rounding up. This is *not* calendar
//! truncation: anything from 12:00 UTC onwards already counts as the next day.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Whole days since the Unix epoch.
pub type Day = u64;

/// Milliseconds in one day.
pub const ONE_DAY_MS: u64 = 1000 * 60 * 60 * 24;

/// Map a millisecond offset from the Unix epoch to its ledger day.
///
/// Negative offsets use their absolute distance, so moments before the epoch
/// map onto the same positive day indices as their mirror images.
pub fn day_from_millis(ms: i64) -> Day {
    let distance = ms.unsigned_abs();
    (distance + ONE_DAY_MS / 2) / ONE_DAY_MS
}

/// An absolute moment with millisecond precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Moment `ms` milliseconds after (or, if negative, before) the Unix epoch.
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    /// Midnight (UTC) at the start of `day`.
    pub fn from_day(day: Day) -> Self {
        let ms = day.saturating_mul(ONE_DAY_MS).min(i64::MAX as u64);
        Self(ms as i64)
    }

    /// Signed millisecond offset from the Unix epoch.
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Ledger day this moment falls on.
    pub fn day(&self) -> Day {
        day_from_millis(self.0)
    }

    /// Shift by a whole number of days (negative moves backwards).
    pub fn add_days(self, days: i64) -> Self {
        Self(self.0.saturating_add(days.saturating_mul(ONE_DAY_MS as i64)))
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }
}

impl From<SystemTime> for Timestamp {
    fn from(value: SystemTime) -> Self {
        match value.duration_since(UNIX_EPOCH) {
            Ok(after) => Self(i64::try_from(after.as_millis()).unwrap_or(i64::MAX)),
            Err(before) => {
                let ms = i64::try_from(before.duration().as_millis()).unwrap_or(i64::MAX);
                Self(-ms)
            }
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HALF_DAY_MS: i64 = (ONE_DAY_MS / 2) as i64;

    #[test]
    fn test_epoch_is_day_zero() {
        assert_eq!(day_from_millis(0), 0);
        assert_eq!(Timestamp::EPOCH.day(), 0);
    }

    #[test]
    fn test_rounds_to_nearest_day() {
        assert_eq!(day_from_millis(HALF_DAY_MS - 1), 0);
        // Halves round up.
        assert_eq!(day_from_millis(HALF_DAY_MS), 1);
        assert_eq!(Timestamp::from_millis(HALF_DAY_MS).day(), 1);
        assert_eq!(day_from_millis(ONE_DAY_MS as i64 + HALF_DAY_MS - 1), 1);
        assert_eq!(day_from_millis(ONE_DAY_MS as i64 + HALF_DAY_MS), 2);
    }

    #[test]
    fn test_same_calendar_day_can_split() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap();
        let morning_day = Timestamp::from(morning).day();
        let evening_day = Timestamp::from(evening).day();
        assert_eq!(evening_day, morning_day + 1);
    }

    #[test]
    fn test_before_epoch_uses_absolute_distance() {
        assert_eq!(day_from_millis(-3 * ONE_DAY_MS as i64), 3);
        assert_eq!(day_from_millis(-HALF_DAY_MS), 1);
        assert_eq!(day_from_millis(i64::MIN), (i64::MIN.unsigned_abs() + ONE_DAY_MS / 2) / ONE_DAY_MS);
    }

    #[test]
    fn test_from_day_roundtrip() {
        for day in [0u64, 1, 14, 19_000, 30_000] {
            assert_eq!(Timestamp::from_day(day).day(), day);
        }
        assert_eq!(Timestamp::from_day(3).add_days(2).day(), 5);
        assert_eq!(Timestamp::from_day(3).add_days(-2).day(), 1);
    }

    #[test]
    fn test_system_time_conversion() {
        let before = UNIX_EPOCH - std::time::Duration::from_millis(1500);
        assert_eq!(Timestamp::from(before).as_millis(), -1500);
        let after = UNIX_EPOCH + std::time::Duration::from_millis(42);
        assert_eq!(Timestamp::from(after).as_millis(), 42);
    }

    #[test]
    fn test_display_is_rfc3339() {
        assert_eq!(Timestamp::from_day(1).to_string(), "1970-01-02T00:00:00+00:00");
    }
}
