//! Revenue-engine errors.
//!
//! Every error aborts the failing operation before any state is mutated.

use thiserror::Error;

use revshare_ledger::LedgerError;
use revshare_store::StoreError;
use revshare_types::{AccountId, RevshareError, SnapshotId};

#[derive(Debug, Error)]
pub enum RevenueError {
    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, available {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("snapshot interval is too short: {elapsed}s elapsed, {required}s required")]
    IntervalTooShort { elapsed: u64, required: u64 },

    #[error("invalid snapshot {id} (current snapshot is {current})")]
    InvalidSnapshot { id: SnapshotId, current: SnapshotId },

    #[error("snapshot {id} is unclaimable (current snapshot is {current})")]
    SnapshotUnclaimable { id: SnapshotId, current: SnapshotId },

    #[error("{account} already claimed snapshot {id}")]
    AlreadyClaimed { account: AccountId, id: SnapshotId },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("custody holds {available}, cannot pay out {needed}")]
    InsufficientCustody { needed: u128, available: u128 },

    #[error("minting is only allowed at genesis")]
    GenesisClosed,

    #[error("arithmetic overflow in revenue computation")]
    Overflow,

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<LedgerError> for RevenueError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance { needed, available } => {
                Self::InsufficientBalance { needed, available }
            }
            LedgerError::InsufficientAllowance { needed, available } => {
                Self::InsufficientAllowance { needed, available }
            }
            LedgerError::GenesisClosed => Self::GenesisClosed,
            LedgerError::Overflow => Self::Overflow,
        }
    }
}

impl From<RevshareError> for RevenueError {
    fn from(err: RevshareError) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}

impl From<bincode::Error> for RevenueError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
