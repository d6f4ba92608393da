//! Unit ledger for the revenue-sharing token.
//!
//! Owns every account balance and the total issued units. Balances are
//! checkpointed lazily against snapshot ids so historical balances can be
//! read back after later transfers and burns:
//!
//! - the first mutation of an account after snapshot `n` records the value the
//!   account held when `n` was taken;
//! - accounts never touched since `n` still report their live balance for `n`.

pub mod checkpoint;
pub mod error;
pub mod ledger;

pub use checkpoint::Checkpoints;
pub use error::LedgerError;
pub use ledger::{AccountState, Ledger};
