//! Ledger events.

use dayweight_types::{Amount, Balance, Day, ParticipantId};
use serde::{Deserialize, Serialize};

/// One balance movement for a participant, already aligned to its ledger day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Event {
    Deposit {
        participant: ParticipantId,
        amount: Amount,
        day: Day,
    },
    Withdraw {
        participant: ParticipantId,
        amount: Amount,
        day: Day,
    },
}

impl Event {
    pub fn participant(&self) -> &ParticipantId {
        match self {
            Event::Deposit { participant, .. } | Event::Withdraw { participant, .. } => participant,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            Event::Deposit { amount, .. } | Event::Withdraw { amount, .. } => *amount,
        }
    }

    pub fn day(&self) -> Day {
        match self {
            Event::Deposit { day, .. } | Event::Withdraw { day, .. } => *day,
        }
    }

    pub fn is_deposit(&self) -> bool {
        matches!(self, Event::Deposit { .. })
    }

    /// Signed change this event applies to its participant's balance.
    pub fn delta(&self) -> Balance {
        match self {
            Event::Deposit { amount, .. } => Balance::from(*amount),
            Event::Withdraw { amount, .. } => -Balance::from(*amount),
        }
    }

    pub fn belongs_to(&self, participant: &ParticipantId) -> bool {
        self.participant() == participant
    }
}
