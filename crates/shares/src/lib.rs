//! Day-weight Shares
//!
//! Converts the ledger's deposit/withdraw history into time-weighted shares:
//! per-participant balance-days, the system-wide total at a day, 4-decimal
//! shares of that total and pro-rata payouts of a reward pool.

pub mod calculator;
pub mod distribution;
pub mod errors;
pub mod fees;
pub mod share;

pub use calculator::ShareCalculator;
pub use distribution::{Allocation, Payout};
pub use errors::ShareError;
pub use fees::{fee, without_fee};
pub use share::{rounded_share, scaled_ratio};
