//! Snapshot manager: interval gate, per-period inflow and pool crediting.

use serde::{Deserialize, Serialize};

use crate::error::RevenueError;
use crate::pool::{slot_for, RevenuePool, POOL_SLOTS};
use revshare_types::{SnapshotId, Timestamp, PERCENT_DENOMINATOR};

/// An immutable checkpoint record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub timestamp: Timestamp,
    /// Total issued units when the snapshot was taken.
    pub total_units: u128,
}

/// What a successful [`SnapshotManager::take`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapshotOutcome {
    pub id: SnapshotId,
    /// Custodied inflow since the previous snapshot.
    pub inflow: u128,
    /// Part of `inflow` credited to the claim pool.
    pub period_revenue: u128,
}

/// Owns the snapshot counter, the snapshot history and both revenue pools.
///
/// `baseline_at_last_snapshot` is the custodied balance as of the latest
/// snapshot, reduced by every payout made since. The difference between the
/// live custodied balance and the baseline is therefore exactly the external
/// inflow of the current period.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotManager {
    current_id: SnapshotId,
    last_snapshot_timestamp: Timestamp,
    min_interval_secs: u64,
    baseline_at_last_snapshot: u128,
    pools: [RevenuePool; POOL_SLOTS],
    history: Vec<Snapshot>,
}

impl SnapshotManager {
    /// Start with no snapshots; the interval is measured from `genesis`.
    pub fn new(min_interval_secs: u64, genesis: Timestamp) -> Self {
        Self {
            current_id: 0,
            last_snapshot_timestamp: genesis,
            min_interval_secs,
            baseline_at_last_snapshot: 0,
            pools: [RevenuePool::default(); POOL_SLOTS],
            history: Vec::new(),
        }
    }

    /// Take a snapshot at `now`.
    ///
    /// `custodied_balance` and `total_units` are the live values at `now`.
    /// Nothing is mutated unless the snapshot succeeds.
    pub fn take(
        &mut self,
        now: Timestamp,
        custodied_balance: u128,
        total_units: u128,
        percent_claimable: u8,
    ) -> Result<SnapshotOutcome, RevenueError> {
        let elapsed = self.last_snapshot_timestamp.elapsed_since(now);
        if now < self.next_snapshot_at() {
            return Err(RevenueError::IntervalTooShort {
                elapsed,
                required: self.min_interval_secs,
            });
        }

        let inflow = match custodied_balance.checked_sub(self.baseline_at_last_snapshot) {
            Some(delta) => delta,
            None => {
                tracing::warn!(
                    custodied_balance,
                    baseline = self.baseline_at_last_snapshot,
                    "custodied balance below snapshot baseline; period inflow clamped to zero"
                );
                0
            }
        };
        let period_revenue = inflow
            .checked_mul(u128::from(percent_claimable))
            .ok_or(RevenueError::Overflow)?
            / PERCENT_DENOMINATOR;

        let id = self
            .current_id
            .checked_add(1)
            .ok_or(RevenueError::Overflow)?;
        let slot = slot_for(id);
        let accumulated = self.pools[slot]
            .accumulated_amount
            .checked_add(period_revenue)
            .ok_or(RevenueError::Overflow)?;

        self.current_id = id;
        self.history.push(Snapshot {
            id,
            timestamp: now,
            total_units,
        });
        self.pools[slot] = RevenuePool {
            accumulated_amount: accumulated,
            most_recent_snapshot_id: id,
        };
        self.baseline_at_last_snapshot = custodied_balance;
        self.last_snapshot_timestamp = now;

        tracing::info!(
            snapshot_id = id,
            slot,
            inflow,
            period_revenue,
            accumulated,
            "snapshot taken"
        );

        Ok(SnapshotOutcome {
            id,
            inflow,
            period_revenue,
        })
    }

    /// Account for value leaving custody so it is not read as negative inflow.
    pub fn record_outflow(&mut self, amount: u128) {
        self.baseline_at_last_snapshot = self.baseline_at_last_snapshot.saturating_sub(amount);
    }

    pub fn current_id(&self) -> SnapshotId {
        self.current_id
    }

    pub fn last_snapshot_timestamp(&self) -> Timestamp {
        self.last_snapshot_timestamp
    }

    pub fn min_interval_secs(&self) -> u64 {
        self.min_interval_secs
    }

    pub fn baseline_at_last_snapshot(&self) -> u128 {
        self.baseline_at_last_snapshot
    }

    /// Earliest time the next snapshot may be taken.
    pub fn next_snapshot_at(&self) -> Timestamp {
        self.last_snapshot_timestamp.plus_secs(self.min_interval_secs)
    }

    pub fn pool(&self, slot: usize) -> Option<&RevenuePool> {
        self.pools.get(slot)
    }

    /// Pool slot fed by snapshot `id`.
    pub fn pool_for(&self, id: SnapshotId) -> &RevenuePool {
        &self.pools[slot_for(id)]
    }

    /// Snapshot record by id. Ids are dense and start at 1.
    pub fn get(&self, id: SnapshotId) -> Option<&Snapshot> {
        let idx = usize::try_from(id.checked_sub(1)?).ok()?;
        self.history.get(idx)
    }

    /// Total units at snapshot `id`; `InvalidSnapshot` if it was never taken.
    pub fn total_units_at(&self, id: SnapshotId) -> Result<u128, RevenueError> {
        self.get(id)
            .map(|s| s.total_units)
            .ok_or(RevenueError::InvalidSnapshot {
                id,
                current: self.current_id,
            })
    }
}
