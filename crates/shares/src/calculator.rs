//! Participant weights and shares.
//!
//! A participant's weight ("balance-days") is the discretized integral of
//! their balance from their first event up to the query day. The system
//! total is read from the ledger's snapshot table and extrapolated with the
//! prevailing rate, and a share is the ratio of the two.

use crate::errors::ShareError;
use crate::share::rounded_share;
use dayweight_ledger::config::DEFAULT_SHARE_SCALE;
use dayweight_ledger::{elapsed, Ledger, LedgerConfig};
use dayweight_types::{Balance, Day, ParticipantId, Timestamp, Weight};
use rust_decimal::Decimal;
use tracing::debug;

/// Read-only share queries over a borrowed [`Ledger`].
#[derive(Debug, Clone, Copy)]
pub struct ShareCalculator<'a> {
    ledger: &'a Ledger,
    scale: u32,
}

impl<'a> ShareCalculator<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self {
            ledger,
            scale: DEFAULT_SHARE_SCALE,
        }
    }

    pub fn with_config(ledger: &'a Ledger, config: &LedgerConfig) -> Self {
        Self {
            ledger,
            scale: config.share_scale,
        }
    }

    pub fn ledger(&self) -> &'a Ledger {
        self.ledger
    }

    /// Decimal places of returned shares.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Balance-days accrued by `participant` before `until_day`.
    ///
    /// Events on or after `until_day` are ignored. The first event only sets
    /// the starting point; each later event adds the days since the previous
    /// event times the balance held over them, and the balance after the last
    /// event is carried up to `until_day`.
    pub fn weight_for_participant(
        &self,
        participant: &ParticipantId,
        until_day: Day,
    ) -> Result<Weight, ShareError> {
        let mut balance: Balance = 0;
        let mut previous_day: Option<Day> = None;
        let mut weight: i128 = 0;

        for event in self
            .ledger
            .events_for(participant)
            .filter(|event| event.day() < until_day)
        {
            if let Some(previous) = previous_day {
                weight = accrue(weight, elapsed(previous, event.day()), balance)?;
            }
            balance += event.delta();
            previous_day = Some(event.day());
        }

        if let Some(last) = previous_day {
            weight = accrue(weight, elapsed(last, until_day), balance)?;
        }

        debug!(
            target: "shares",
            participant = %participant,
            until_day,
            weight = %weight,
            "Participant weight computed"
        );

        Weight::try_from(weight).map_err(|_| ShareError::NegativeWeight {
            participant: *participant,
            day: until_day,
            weight,
        })
    }

    /// Same as [`Self::weight_for_participant`] for an unaligned moment.
    pub fn weight_for_participant_at(
        &self,
        participant: &ParticipantId,
        moment: impl Into<Timestamp>,
    ) -> Result<Weight, ShareError> {
        self.weight_for_participant(participant, moment.into().day())
    }

    /// System-wide balance-days at `until_day`.
    pub fn total_weight_at(&self, until_day: Day) -> Result<Weight, ShareError> {
        let snapshot = self.ledger.resolve_snapshot(until_day);
        let total = elapsed(snapshot.date, until_day)
            .checked_mul(snapshot.rate)
            .and_then(|carried| carried.checked_add(snapshot.total_amount))
            .ok_or(ShareError::Overflow("total weight"))?;

        Weight::try_from(total).map_err(|_| ShareError::NegativeTotalWeight {
            day: until_day,
            weight: total,
        })
    }

    /// Share of the system weight held by `participant` at `until_day`,
    /// rounded half-up to [`Self::scale`] places.
    ///
    /// Fails with [`ShareError::UndefinedShare`] while the system weight is zero.
    pub fn share_percent(
        &self,
        participant: &ParticipantId,
        until_day: Day,
    ) -> Result<Decimal, ShareError> {
        let total = self.total_weight_at(until_day)?;
        if total == 0 {
            return Err(ShareError::UndefinedShare { day: until_day });
        }
        let weight = self.weight_for_participant(participant, until_day)?;
        rounded_share(weight, total, self.scale)
    }

    /// Same as [`Self::share_percent`] for an unaligned moment.
    pub fn share_percent_at(
        &self,
        participant: &ParticipantId,
        moment: impl Into<Timestamp>,
    ) -> Result<Decimal, ShareError> {
        self.share_percent(participant, moment.into().day())
    }

    /// Shares of every participant known to the ledger, in first-appearance order.
    pub fn shares(&self, until_day: Day) -> Result<Vec<(ParticipantId, Decimal)>, ShareError> {
        self.ledger
            .participants()
            .into_iter()
            .map(|participant| {
                let share = self.share_percent(&participant, until_day)?;
                Ok((participant, share))
            })
            .collect()
    }
}

fn accrue(weight: i128, days: i128, balance: Balance) -> Result<i128, ShareError> {
    days.checked_mul(balance)
        .and_then(|added| weight.checked_add(added))
        .ok_or(ShareError::Overflow("participant weight"))
}
