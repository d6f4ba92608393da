//! Nullable store — thread-safe in-memory storage for testing.

use revshare_store::{BatchOp, RevenueStore, StoreError, WriteBatch};
use revshare_types::AccountId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<AccountId, Vec<u8>>,
    meta: HashMap<Vec<u8>, Vec<u8>>,
}

/// An in-memory [`RevenueStore`].
///
/// Both tables sit behind one lock, so a batch is applied atomically. The
/// next commit can be made to fail with [`NullStore::fail_next_commit`].
#[derive(Debug, Default)]
pub struct NullStore {
    tables: Mutex<Tables>,
    fail_next_commit: AtomicBool,
    commits: AtomicUsize,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next [`RevenueStore::commit`] fail without writing anything.
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Number of batches committed successfully.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn account_count(&self) -> usize {
        self.lock().map_or(0, |t| t.accounts.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|e| StoreError::Backend(format!("null store lock poisoned: {e}")))
    }
}

impl RevenueStore for NullStore {
    fn get_account(&self, account: &AccountId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.accounts.get(account).cloned())
    }

    fn iter_accounts(&self) -> Result<Vec<(AccountId, Vec<u8>)>, StoreError> {
        let tables = self.lock()?;
        let mut entries: Vec<_> = tables
            .accounts
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.meta.get(key).cloned())
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("injected commit failure".to_string()));
        }
        for op in batch.into_ops() {
            match op {
                BatchOp::PutAccount { account, record } => {
                    tables.accounts.insert(account, record);
                }
                BatchOp::PutMeta { key, value } => {
                    tables.meta.insert(key, value);
                }
            }
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
