//! Append-only day-weight ledger.
//!
//! Stores every deposit and withdrawal in call order and maintains a sparse
//! day-indexed table of system-wide [`AggregateSnapshot`]s. Each new snapshot
//! is derived from the snapshot at the day of the most recently appended
//! event, so callers are expected to append in non-decreasing day order.

use crate::config::{LedgerConfig, OrderingPolicy};
use crate::errors::LedgerError;
use crate::event::Event;
use crate::snapshot::AggregateSnapshot;
use dayweight_types::{Amount, Balance, Day, ParticipantId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    events: Vec<Event>,
    snapshots: BTreeMap<Day, AggregateSnapshot>,
    #[serde(default)]
    ordering: OrderingPolicy,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &LedgerConfig) -> Self {
        Self {
            ordering: config.ordering,
            ..Self::default()
        }
    }

    pub fn ordering(&self) -> OrderingPolicy {
        self.ordering
    }

    /// Record a deposit at `moment` and return the ledger day it was booked on.
    pub fn deposit(
        &mut self,
        participant: ParticipantId,
        amount: Amount,
        moment: impl Into<Timestamp>,
    ) -> Result<Day, LedgerError> {
        let day = moment.into().day();
        self.append(Event::Deposit {
            participant,
            amount,
            day,
        })
    }

    /// Record a withdrawal at `moment`.
    ///
    /// Fails with [`LedgerError::InsufficientBalance`] when `amount` exceeds the
    /// participant's lifetime balance; the ledger is left untouched.
    pub fn withdraw(
        &mut self,
        participant: ParticipantId,
        amount: Amount,
        moment: impl Into<Timestamp>,
    ) -> Result<Day, LedgerError> {
        let available = self.total_balance(&participant);
        if Balance::from(amount) > available {
            warn!(
                target: "ledger",
                participant = %participant,
                requested = amount,
                available = %available,
                "Withdraw rejected: insufficient balance"
            );
            return Err(LedgerError::InsufficientBalance {
                participant,
                requested: amount,
                available,
            });
        }

        let day = moment.into().day();
        self.append(Event::Withdraw {
            participant,
            amount,
            day,
        })
    }

    fn append(&mut self, event: Event) -> Result<Day, LedgerError> {
        let day = event.day();
        let latest = self.latest_deposit_day();

        if day < latest && self.ordering == OrderingPolicy::Reject {
            warn!(
                target: "ledger",
                day,
                latest,
                "Backdated event rejected"
            );
            return Err(LedgerError::NonMonotonicEvent { day, latest });
        }

        let previous = self.resolve_snapshot(latest);
        let snapshot = previous.advance(day, event.delta());

        self.events.push(event);
        self.snapshots.insert(day, snapshot);

        debug!(
            target: "ledger",
            participant = %event.participant(),
            deposit = event.is_deposit(),
            amount = event.amount(),
            day,
            rate = %snapshot.rate,
            total_amount = %snapshot.total_amount,
            "Event appended"
        );

        Ok(day)
    }

    /// Net balance of `participant` over the whole event history.
    pub fn total_balance(&self, participant: &ParticipantId) -> Balance {
        self.events_for(participant).map(Event::delta).sum()
    }

    /// Day of the last appended event, `0` for an empty ledger.
    pub fn latest_deposit_day(&self) -> Day {
        self.events.last().map(Event::day).unwrap_or(0)
    }

    /// Midnight of [`Self::latest_deposit_day`].
    pub fn latest_deposit_moment(&self) -> Timestamp {
        Timestamp::from_day(self.latest_deposit_day())
    }

    /// Snapshot in force at `day`.
    ///
    /// An exact entry wins. Otherwise the most recently appended event booked
    /// on or before `day` selects the snapshot; with no such event the zero
    /// snapshot dated `day` is returned.
    pub fn resolve_snapshot(&self, day: Day) -> AggregateSnapshot {
        if let Some(snapshot) = self.snapshots.get(&day) {
            return *snapshot;
        }

        self.events
            .iter()
            .rev()
            .find(|event| event.day() <= day)
            .and_then(|event| self.snapshots.get(&event.day()))
            .copied()
            .unwrap_or_else(|| AggregateSnapshot::zero(day))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events of one participant, in append order.
    pub fn events_for<'a>(
        &'a self,
        participant: &'a ParticipantId,
    ) -> impl Iterator<Item = &'a Event> + 'a {
        self.events
            .iter()
            .filter(move |event| event.belongs_to(participant))
    }

    pub fn snapshots(&self) -> &BTreeMap<Day, AggregateSnapshot> {
        &self.snapshots
    }

    /// Distinct participants in order of first appearance.
    pub fn participants(&self) -> Vec<ParticipantId> {
        let mut seen = HashSet::new();
        self.events
            .iter()
            .map(|event| *event.participant())
            .filter(|participant| seen.insert(*participant))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(s: &str) -> ParticipantId {
        ParticipantId::from_label(s)
    }

    fn on(day: Day) -> Timestamp {
        Timestamp::from_day(day)
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.latest_deposit_day(), 0);
        assert_eq!(ledger.latest_deposit_moment(), Timestamp::EPOCH);
        assert_eq!(ledger.total_balance(&user("123")), 0);
        assert_eq!(ledger.resolve_snapshot(17), AggregateSnapshot::zero(17));
    }

    #[test]
    fn test_deposit_and_withdraw_balance() {
        let mut ledger = Ledger::new();
        let u1 = user("123");

        assert_eq!(ledger.deposit(u1, 300, on(5)).unwrap(), 5);
        ledger.deposit(u1, 1000, on(5)).unwrap();
        ledger.withdraw(u1, 100, on(5)).unwrap();

        assert_eq!(ledger.total_balance(&u1), 1200);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.latest_deposit_moment(), on(5));
    }

    #[test]
    fn test_withdraw_on_empty_ledger_fails() {
        let mut ledger = Ledger::new();
        let u1 = user("123");

        let err = ledger.withdraw(u1, 5000, on(0)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                participant: u1,
                requested: 5000,
                available: 0
            }
        );
        assert_eq!(ledger.total_balance(&u1), 0);
        assert!(ledger.is_empty());
        assert!(ledger.snapshots().is_empty());
    }

    #[test]
    fn test_withdraw_checks_only_own_balance() {
        let mut ledger = Ledger::new();
        ledger.deposit(user("rich"), 10_000, on(1)).unwrap();
        assert!(ledger.withdraw(user("poor"), 1, on(2)).is_err());
        // Exactly the full balance is allowed.
        ledger.deposit(user("poor"), 50, on(2)).unwrap();
        ledger.withdraw(user("poor"), 50, on(3)).unwrap();
        assert_eq!(ledger.total_balance(&user("poor")), 0);
    }

    #[test]
    fn test_snapshot_chain() {
        let mut ledger = Ledger::new();
        ledger.deposit(user("1"), 1000, on(0)).unwrap();
        ledger.deposit(user("2"), 1500, on(1)).unwrap();
        ledger.withdraw(user("1"), 400, on(14)).unwrap();

        let snapshots = ledger.snapshots();
        assert_eq!(snapshots[&0], AggregateSnapshot { rate: 1000, total_amount: 0, date: 0 });
        assert_eq!(snapshots[&1], AggregateSnapshot { rate: 2500, total_amount: 1000, date: 1 });
        assert_eq!(snapshots[&14], AggregateSnapshot { rate: 2100, total_amount: 33_500, date: 14 });
    }

    #[test]
    fn test_same_day_events_overwrite_snapshot() {
        let mut ledger = Ledger::new();
        ledger.deposit(user("1"), 100, on(3)).unwrap();
        ledger.deposit(user("2"), 200, on(3)).unwrap();

        assert_eq!(ledger.snapshots().len(), 1);
        assert_eq!(ledger.snapshots()[&3], AggregateSnapshot { rate: 300, total_amount: 0, date: 3 });
    }

    #[test]
    fn test_resolve_snapshot_uses_nearest_preceding_event() {
        let mut ledger = Ledger::new();
        ledger.deposit(user("1"), 100, on(2)).unwrap();
        ledger.deposit(user("1"), 100, on(10)).unwrap();

        assert_eq!(ledger.resolve_snapshot(10).date, 10);
        assert_eq!(ledger.resolve_snapshot(7), ledger.snapshots()[&2]);
        assert_eq!(ledger.resolve_snapshot(25), ledger.snapshots()[&10]);
        assert_eq!(ledger.resolve_snapshot(1), AggregateSnapshot::zero(1));
    }

    #[test]
    fn test_zero_deposit_is_recorded() {
        let mut ledger = Ledger::new();
        ledger.deposit(user("1"), 0, on(4)).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.resolve_snapshot(4), AggregateSnapshot::zero(4));
    }

    #[test]
    fn test_backdated_event_rejected_by_default() {
        let mut ledger = Ledger::new();
        ledger.deposit(user("1"), 100, on(10)).unwrap();

        let before = ledger.clone();
        let err = ledger.deposit(user("2"), 50, on(9)).unwrap_err();
        assert_eq!(err, LedgerError::NonMonotonicEvent { day: 9, latest: 10 });
        assert_eq!(ledger.events(), before.events());
        assert_eq!(ledger.snapshots(), before.snapshots());
    }

    #[test]
    fn test_backdated_event_permitted() {
        let config = LedgerConfig {
            ordering: OrderingPolicy::Permit,
            ..LedgerConfig::default()
        };
        let mut ledger = Ledger::with_config(&config);
        ledger.deposit(user("1"), 100, on(10)).unwrap();
        ledger.deposit(user("2"), 50, on(4)).unwrap();

        // Built from the day-10 snapshot, carried backwards.
        assert_eq!(
            ledger.snapshots()[&4],
            AggregateSnapshot { rate: 150, total_amount: -600, date: 4 }
        );
        assert_eq!(ledger.latest_deposit_day(), 4);
    }

    #[test]
    fn test_participants_in_first_appearance_order() {
        let mut ledger = Ledger::new();
        ledger.deposit(user("b"), 1, on(1)).unwrap();
        ledger.deposit(user("a"), 1, on(2)).unwrap();
        ledger.deposit(user("b"), 1, on(3)).unwrap();
        assert_eq!(ledger.participants(), vec![user("b"), user("a")]);
    }

    #[test]
    fn test_json_roundtrip_preserves_state() {
        let mut ledger = Ledger::new();
        ledger.deposit(user("1"), 1000, on(0)).unwrap();
        ledger.withdraw(user("1"), 250, on(6)).unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.events(), ledger.events());
        assert_eq!(restored.snapshots(), ledger.snapshots());
        assert_eq!(restored.ordering(), OrderingPolicy::Reject);
    }
}
