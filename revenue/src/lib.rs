//! Revenue engine for the revenue-sharing unit ledger.
//!
//! Custodied value arrives passively through [`RevenueToken::deposit`] and is
//! split two ways:
//!
//! - `percent_claimable` of every period's inflow lands in one of two rolling
//!   revenue pools when a snapshot is taken, and holders claim their pro-rata
//!   share against the two most recent snapshots;
//! - the remainder is redeemable by burning units, through a vault that
//!   accumulates inflow since the previous burn and is emptied by every burn.
//!
//! All arithmetic is integer with truncating division, so results are
//! bit-reproducible.

pub mod claims;
pub mod custody;
pub mod error;
pub mod events;
pub mod persist;
pub mod pool;
pub mod redemption;
pub mod snapshot;
pub mod token;

pub use claims::{check_claim_window, ClaimEngine, ClaimPlan, ClaimRecord};
pub use custody::Custody;
pub use error::RevenueError;
pub use events::TokenEvent;
pub use persist::{AccountRecord, TOKEN_META_KEY};
pub use pool::{slot_for, RevenuePool, POOL_SLOTS};
pub use redemption::RedemptionAccumulator;
pub use snapshot::{Snapshot, SnapshotManager, SnapshotOutcome};
pub use token::{RevenueToken, DECIMALS};
