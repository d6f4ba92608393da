//! Fundamental types for the revenue-sharing unit ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identifiers, timestamps and clocks, snapshot ids, token parameters and the
//! shared error type.

pub mod address;
pub mod error;
pub mod params;
pub mod time;

pub use address::AccountId;
pub use error::RevshareError;
pub use params::{TokenParams, PERCENT_DENOMINATOR};
pub use time::{Clock, SystemClock, Timestamp};

/// Sequential snapshot identifier. `0` means "no snapshot taken yet".
pub type SnapshotId = u64;
