//! Day-weight Ledger
//!
//! Append-only record of participant deposits and withdrawals with a
//! day-indexed table of system-wide balance snapshots. The share calculator
//! replays this record to derive time-weighted reward shares.

pub mod config;
pub mod errors;
pub mod event;
pub mod ledger;
pub mod shared;
pub mod snapshot;

pub use config::{LedgerConfig, OrderingPolicy};
pub use errors::LedgerError;
pub use event::Event;
pub use ledger::Ledger;
pub use shared::SharedLedger;
pub use snapshot::{elapsed, AggregateSnapshot};
