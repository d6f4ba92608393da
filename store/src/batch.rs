//! Write batching — groups every record touched by one accepted operation so
//! the backend can commit them in a single transaction.
//!
//! # Usage
//!
//! ```
//! use revshare_store::WriteBatch;
//! use revshare_types::AccountId;
//!
//! let mut batch = WriteBatch::new();
//! batch.put_account(&AccountId::new("alice").unwrap(), vec![1, 2, 3]);
//! batch.put_meta(b"token", vec![4, 5]);
//! assert_eq!(batch.len(), 2);
//! ```
//!
//! A batch that is dropped without being handed to
//! [`RevenueStore::commit`](crate::RevenueStore::commit) writes nothing.

use revshare_types::AccountId;

/// A single buffered write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOp {
    /// Replace the serialized record of one account.
    PutAccount { account: AccountId, record: Vec<u8> },
    /// Replace a metadata value.
    PutMeta { key: Vec<u8>, value: Vec<u8> },
}

/// An ordered set of writes committed atomically by a [`RevenueStore`](crate::RevenueStore).
#[derive(Clone, Debug, Default)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer an account record.
    pub fn put_account(&mut self, account: &AccountId, record: Vec<u8>) {
        self.ops.push(BatchOp::PutAccount {
            account: account.clone(),
            record,
        });
    }

    /// Buffer a metadata value.
    pub fn put_meta(&mut self, key: &[u8], value: Vec<u8>) {
        self.ops.push(BatchOp::PutMeta {
            key: key.to_vec(),
            value,
        });
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Consume the batch, yielding its writes in insertion order.
    pub fn into_ops(self) -> Vec<BatchOp> {
        self.ops
    }
}
