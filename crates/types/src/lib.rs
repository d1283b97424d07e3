//! Shared primitives for the day-weight accounting workspace.
//!
//! Amounts are integer token units, time is measured in ledger days and
//! participants are opaque 32-byte keys.

pub mod day;
pub mod participant;

pub use day::*;
pub use participant::*;

/// Token amount as observed in deposit/withdraw events.
pub type Amount = u64;

/// Signed running balance. Wider than [`Amount`] so folds never overflow.
pub type Balance = i128;

/// Balance-days: the time integral of a balance.
pub type Weight = u128;
