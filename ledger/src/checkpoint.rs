//! Lazily recorded per-snapshot values.

use serde::{Deserialize, Serialize};

use revshare_types::SnapshotId;

/// Values recorded the first time a tracked quantity changes after a snapshot.
///
/// `ids` is strictly increasing. Entry `i` holds the value the quantity had
/// when snapshot `ids[i]` was taken; it was unchanged for every snapshot id
/// in `(ids[i - 1], ids[i]]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoints {
    ids: Vec<SnapshotId>,
    values: Vec<u128>,
}

impl Checkpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `current_value` for `current_id` if nothing has been recorded
    /// for that id yet. Must be called *before* the tracked value changes.
    ///
    /// With no snapshot taken (`current_id == 0`) there is nothing to record.
    pub fn record(&mut self, current_id: SnapshotId, current_value: u128) {
        if current_id == 0 {
            return;
        }
        if self.ids.last().map_or(true, |&last| last < current_id) {
            self.ids.push(current_id);
            self.values.push(current_value);
        }
    }

    /// Value as of snapshot `id`, or `None` if the quantity has not changed
    /// since `id` was taken (the live value applies).
    pub fn value_at(&self, id: SnapshotId) -> Option<u128> {
        let idx = self.ids.partition_point(|&recorded| recorded < id);
        self.values.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
