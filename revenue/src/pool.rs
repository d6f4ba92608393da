//! The two rolling revenue pools.
//!
//! Snapshot `n` feeds slot `n % 2`. A slot never resets: revenue from a
//! snapshot that falls out of the claim window stays in its slot and becomes
//! claimable again through the next snapshot of the same parity.

use serde::{Deserialize, Serialize};

use revshare_types::SnapshotId;

/// Number of pool slots; also the width of the claim window.
pub const POOL_SLOTS: usize = 2;

/// Pool slot fed by snapshot `id`.
pub fn slot_for(id: SnapshotId) -> usize {
    (id % POOL_SLOTS as u64) as usize
}

/// One revenue accumulator slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePool {
    /// Claimable revenue ever credited to this slot.
    pub accumulated_amount: u128,
    /// Latest snapshot that credited this slot (0 = never).
    pub most_recent_snapshot_id: SnapshotId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_alternate_by_parity() {
        assert_eq!(slot_for(1), 1);
        assert_eq!(slot_for(2), 0);
        assert_eq!(slot_for(3), 1);
        assert_eq!(slot_for(4), 0);
    }
}
