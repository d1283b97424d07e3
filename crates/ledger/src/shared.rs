//! Lock-protected ledger handle for concurrent hosts.
//!
//! Mutations take the write lock, queries the read lock, so a query never
//! observes a snapshot table that is halfway through an append.

use crate::errors::LedgerError;
use crate::ledger::Ledger;
use crate::snapshot::AggregateSnapshot;
use dayweight_types::{Amount, Balance, Day, ParticipantId, Timestamp};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub fn deposit(
        &self,
        participant: ParticipantId,
        amount: Amount,
        moment: impl Into<Timestamp>,
    ) -> Result<Day, LedgerError> {
        self.inner.write().deposit(participant, amount, moment)
    }

    pub fn withdraw(
        &self,
        participant: ParticipantId,
        amount: Amount,
        moment: impl Into<Timestamp>,
    ) -> Result<Day, LedgerError> {
        self.inner.write().withdraw(participant, amount, moment)
    }

    pub fn total_balance(&self, participant: &ParticipantId) -> Balance {
        self.inner.read().total_balance(participant)
    }

    pub fn latest_deposit_day(&self) -> Day {
        self.inner.read().latest_deposit_day()
    }

    pub fn resolve_snapshot(&self, day: Day) -> AggregateSnapshot {
        self.inner.read().resolve_snapshot(day)
    }

    /// Run a read-only computation against a consistent view of the ledger.
    pub fn with_read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.inner.read())
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> Ledger {
        self.inner.read().clone()
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}
