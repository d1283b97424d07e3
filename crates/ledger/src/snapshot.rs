//! System-wide aggregate snapshots.

use dayweight_types::{Balance, Day};
use serde::{Deserialize, Serialize};

/// Cached `(rate, total_amount)` pair recorded at the day of a ledger event.
///
/// `rate` is the sum of all participants' balances after the event and
/// `total_amount` the integral of `rate` over time up to `date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub rate: Balance,
    pub total_amount: i128,
    pub date: Day,
}

impl AggregateSnapshot {
    /// Empty system state observed at `date`.
    pub fn zero(date: Day) -> Self {
        Self {
            rate: 0,
            total_amount: 0,
            date,
        }
    }

    /// Snapshot after applying `delta` at `day`: the current rate is carried
    /// over `[self.date, day)` before the delta takes effect.
    pub fn advance(&self, day: Day, delta: Balance) -> Self {
        Self {
            rate: self.rate + delta,
            total_amount: self.total_amount + self.rate * elapsed(self.date, day),
            date: day,
        }
    }

    /// System integral at `day`, extrapolated with the prevailing rate.
    pub fn integral_at(&self, day: Day) -> i128 {
        self.total_amount + self.rate * elapsed(self.date, day)
    }
}

/// Signed number of days from `from` to `to`.
pub fn elapsed(from: Day, to: Day) -> i128 {
    i128::from(to) - i128::from(from)
}
