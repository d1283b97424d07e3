use dayweight_types::{Amount, Balance, Day, ParticipantId};
use thiserror::Error;

/// Errors raised by ledger mutations. A failed call never mutates the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error(
        "withdraw amount ({requested}) is higher than total balance ({available}) of participant {participant}"
    )]
    InsufficientBalance {
        participant: ParticipantId,
        requested: Amount,
        available: Balance,
    },

    #[error("event day {day} precedes latest recorded day {latest}")]
    NonMonotonicEvent { day: Day, latest: Day },
}
