use dayweight_ledger::LedgerError;
use dayweight_types::{Day, ParticipantId};
use thiserror::Error;

/// Errors that can occur while computing weights, shares and payouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("share is undefined at day {day}: total system weight is zero")]
    UndefinedShare { day: Day },

    #[error("cannot compute a share of a zero total weight")]
    ZeroTotalWeight,

    #[error("weight of participant {participant} at day {day} is negative ({weight})")]
    NegativeWeight {
        participant: ParticipantId,
        day: Day,
        weight: i128,
    },

    #[error("total system weight at day {day} is negative ({weight})")]
    NegativeTotalWeight { day: Day, weight: i128 },

    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
