//! Pro-rata distribution of a reward pool.
//!
//! Every participant is paid `floor(pool * weight / total)`, so payouts never
//! exceed the pool. Whatever the flooring leaves behind is reported as the
//! remainder and stays with the caller (typically rolled into the next pool).

use crate::calculator::ShareCalculator;
use crate::errors::ShareError;
use crate::share::rounded_share;
use dayweight_types::{Day, ParticipantId, Weight};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One participant's slice of a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub participant: ParticipantId,
    pub weight: Weight,
    /// Rounded share, for reporting.
    pub share: Decimal,
    pub amount: u128,
}

/// Result of distributing `pool` as of `day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub day: Day,
    pub pool: u128,
    pub total_weight: Weight,
    pub payouts: Vec<Payout>,
    pub remainder: u128,
}

impl Allocation {
    pub fn distributed(&self) -> u128 {
        self.payouts.iter().map(|p| p.amount).sum()
    }

    pub fn payout_for(&self, participant: &ParticipantId) -> Option<&Payout> {
        self.payouts.iter().find(|p| &p.participant == participant)
    }
}

impl ShareCalculator<'_> {
    /// Split `pool` among all participants according to their weight at `day`.
    pub fn allocate(&self, pool: u128, day: Day) -> Result<Allocation, ShareError> {
        let total_weight = self.total_weight_at(day)?;
        if total_weight == 0 {
            return Err(ShareError::UndefinedShare { day });
        }

        let mut payouts = Vec::new();
        let mut distributed: u128 = 0;
        for participant in self.ledger().participants() {
            let weight = self.weight_for_participant(&participant, day)?;
            let amount = pro_rata(pool, weight, total_weight)?;
            distributed = distributed
                .checked_add(amount)
                .ok_or(ShareError::Overflow("distributed total"))?;
            payouts.push(Payout {
                participant,
                weight,
                share: rounded_share(weight, total_weight, self.scale())?,
                amount,
            });
        }

        // Only reachable when the snapshot chain disagrees with participant weights.
        let remainder = pool
            .checked_sub(distributed)
            .ok_or(ShareError::Overflow("remainder"))?;

        info!(
            target: "shares",
            day,
            pool = %pool,
            distributed = %distributed,
            remainder = %remainder,
            participants = payouts.len(),
            "Pool allocated"
        );

        Ok(Allocation {
            day,
            pool,
            total_weight,
            payouts,
            remainder,
        })
    }
}

/// `floor(pool * weight / total)` without a `u128` intermediate.
fn pro_rata(pool: u128, weight: Weight, total: Weight) -> Result<u128, ShareError> {
    let scaled = BigUint::from(pool) * BigUint::from(weight) / BigUint::from(total);
    scaled.to_u128().ok_or(ShareError::Overflow("payout"))
}
