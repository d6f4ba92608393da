//! Claim engine: the eligibility window and pro-rata shares per pool slot.
//!
//! Only the two most recent snapshots are claimable. Each account keeps one
//! record per pool slot: the last snapshot id it claimed through that slot
//! and the slot's accumulated amount at that moment. A later claim through
//! the same slot only pays out what the slot accrued since.
//!
//! ## Formula
//!
//! ```text
//! share = (pool[id % 2].accumulated - baseline[account][id % 2])
//!         * balance_at(account, id) / total_units_at(id)
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RevenueError;
use crate::pool::{slot_for, POOL_SLOTS};
use crate::snapshot::SnapshotManager;
use revshare_ledger::Ledger;
use revshare_types::{AccountId, SnapshotId};

/// Per-account claim bookkeeping, bounded to one entry per pool slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Last snapshot id claimed through each slot (0 = never).
    pub claimed_ids: [SnapshotId; POOL_SLOTS],
    /// Slot accumulated amount at the time of that claim.
    pub baselines: [u128; POOL_SLOTS],
}

impl ClaimRecord {
    pub fn is_claimed(&self, id: SnapshotId) -> bool {
        id != 0 && self.claimed_ids[slot_for(id)] == id
    }

    fn mark_claimed(&mut self, id: SnapshotId, accumulated: u128) {
        let slot = slot_for(id);
        self.claimed_ids[slot] = id;
        self.baselines[slot] = accumulated;
    }
}

/// A fully validated set of claims for one account, not yet applied.
///
/// Produced by [`ClaimEngine::prepare`]; applying it with
/// [`ClaimEngine::commit`] cannot fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimPlan {
    pub account: AccountId,
    /// `(snapshot id, amount)` in claim order.
    pub settled: Vec<(SnapshotId, u128)>,
    /// Sum of every settled amount; the single payout for the batch.
    pub total: u128,
    record: ClaimRecord,
}

/// Fail unless snapshot `id` is one of the two most recent.
pub fn check_claim_window(id: SnapshotId, current: SnapshotId) -> Result<(), RevenueError> {
    if current == 0 || id == 0 || id > current {
        return Err(RevenueError::InvalidSnapshot { id, current });
    }
    if id < current - 1 {
        return Err(RevenueError::SnapshotUnclaimable { id, current });
    }
    Ok(())
}

/// Owns every account's claim record.
#[derive(Clone, Debug, Default)]
pub struct ClaimEngine {
    records: HashMap<AccountId, ClaimRecord>,
}

impl ClaimEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records.
    pub fn from_records(records: HashMap<AccountId, ClaimRecord>) -> Self {
        Self { records }
    }

    pub fn record(&self, account: &AccountId) -> Option<&ClaimRecord> {
        self.records.get(account)
    }

    /// Exact for the two claimable ids only: a claim of `id + 2` replaces the
    /// slot's record of `id`.
    pub fn is_claimed(&self, account: &AccountId, id: SnapshotId) -> bool {
        self.records.get(account).is_some_and(|r| r.is_claimed(id))
    }

    /// Revenue `account` would receive by claiming snapshot `id` now.
    pub fn claimable_revenue(
        &self,
        account: &AccountId,
        id: SnapshotId,
        snapshots: &SnapshotManager,
        ledger: &Ledger,
    ) -> Result<u128, RevenueError> {
        check_claim_window(id, snapshots.current_id())?;
        let record = self.records.get(account).copied().unwrap_or_default();
        share_of(&record, account, id, snapshots, ledger)
    }

    /// Validate and price a sequence of claims without touching any state.
    ///
    /// Claims are applied in order against a staged copy of the account's
    /// record, so a later id in the same slot only sees what the earlier one
    /// left. Any failure aborts the whole plan.
    pub fn prepare(
        &self,
        account: &AccountId,
        ids: &[SnapshotId],
        snapshots: &SnapshotManager,
        ledger: &Ledger,
    ) -> Result<ClaimPlan, RevenueError> {
        let mut record = self.records.get(account).copied().unwrap_or_default();
        let mut settled = Vec::with_capacity(ids.len());
        let mut total: u128 = 0;

        for &id in ids {
            if record.is_claimed(id) {
                return Err(RevenueError::AlreadyClaimed {
                    account: account.clone(),
                    id,
                });
            }
            check_claim_window(id, snapshots.current_id())?;
            let amount = share_of(&record, account, id, snapshots, ledger)?;
            record.mark_claimed(id, snapshots.pool_for(id).accumulated_amount);
            total = total.checked_add(amount).ok_or(RevenueError::Overflow)?;
            settled.push((id, amount));
        }

        Ok(ClaimPlan {
            account: account.clone(),
            settled,
            total,
            record,
        })
    }

    /// Apply a prepared plan.
    pub fn commit(&mut self, plan: &ClaimPlan) {
        for &(id, amount) in &plan.settled {
            tracing::info!(account = %plan.account, snapshot_id = id, amount, "claim settled");
        }
        self.records.insert(plan.account.clone(), plan.record);
    }
}

fn share_of(
    record: &ClaimRecord,
    account: &AccountId,
    id: SnapshotId,
    snapshots: &SnapshotManager,
    ledger: &Ledger,
) -> Result<u128, RevenueError> {
    let total_units = snapshots.total_units_at(id)?;
    if total_units == 0 {
        return Ok(0);
    }
    let slot = slot_for(id);
    let share_pool = snapshots
        .pool_for(id)
        .accumulated_amount
        .saturating_sub(record.baselines[slot]);
    let balance = ledger.balance_at(account, id);

    Ok(share_pool
        .checked_mul(balance)
        .ok_or(RevenueError::Overflow)?
        / total_units)
}
