use revshare_types::AccountId;

use crate::{StoreError, WriteBatch};

/// Store trait for persisting revenue-ledger state to durable storage.
///
/// Uses opaque `Vec<u8>` so the store doesn't depend on the `revshare-revenue`
/// crate (which would create a circular dependency). The engine serializes and
/// deserializes its own records.
///
/// Reads observe only committed batches. [`RevenueStore::commit`] must apply
/// every write of the batch or none of them.
pub trait RevenueStore {
    fn get_account(&self, account: &AccountId) -> Result<Option<Vec<u8>>, StoreError>;
    fn iter_accounts(&self) -> Result<Vec<(AccountId, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Atomically apply a batch of writes.
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}

impl<T: RevenueStore + ?Sized> RevenueStore for &T {
    fn get_account(&self, account: &AccountId) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get_account(account)
    }

    fn iter_accounts(&self) -> Result<Vec<(AccountId, Vec<u8>)>, StoreError> {
        (**self).iter_accounts()
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get_meta(key)
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        (**self).commit(batch)
    }
}
