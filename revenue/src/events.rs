//! Events emitted by accepted operations.

use serde::{Deserialize, Serialize};

use revshare_types::{AccountId, SnapshotId, Timestamp};

/// Observable outcome of one accepted operation.
///
/// Events are journaled in emission order and drained by the host with
/// [`RevenueToken::drain_events`](crate::RevenueToken::drain_events).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    /// Units moved. Mints have no sender, burns have no receiver.
    Transfer {
        from: Option<AccountId>,
        to: Option<AccountId>,
        amount: u128,
    },
    /// An allowance was set.
    Approval {
        owner: AccountId,
        spender: AccountId,
        amount: u128,
    },
    /// External value entered custody.
    Deposit { amount: u128 },
    /// A snapshot was taken and its period revenue credited.
    SnapshotTaken {
        id: SnapshotId,
        timestamp: Timestamp,
        period_revenue: u128,
    },
    /// Revenue for one snapshot was paid to a holder.
    ClaimSettled {
        account: AccountId,
        snapshot_id: SnapshotId,
        amount: u128,
    },
    /// Units were burned and custodied value redeemed.
    BurnSettled {
        account: AccountId,
        amount: u128,
        redeemed: u128,
    },
}
