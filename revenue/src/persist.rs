//! Saving and restoring a [`RevenueToken`] through a [`RevenueStore`].
//!
//! Per-account state (ledger entry plus claim record) is stored one record
//! per account; everything else lives in a single meta record. Both are
//! bincode-encoded and written in one batch.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::claims::{ClaimEngine, ClaimRecord};
use crate::custody::Custody;
use crate::error::RevenueError;
use crate::redemption::RedemptionAccumulator;
use crate::snapshot::SnapshotManager;
use crate::token::RevenueToken;
use revshare_ledger::{AccountState, Ledger};
use revshare_store::{RevenueStore, StoreError, WriteBatch};
use revshare_types::TokenParams;

/// Meta key of the token-wide record.
pub const TOKEN_META_KEY: &[u8] = b"token";

/// Stored value of one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub ledger: AccountState,
    pub claims: Option<ClaimRecord>,
}

/// Stored value of the token-wide state.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct TokenMeta {
    params: TokenParams,
    total_units: u128,
    genesis_sealed: bool,
    snapshots: SnapshotManager,
    redemption: RedemptionAccumulator,
    custody: Custody,
}

impl RevenueToken {
    /// Write every account touched since the last save plus the token-wide
    /// state, atomically.
    pub fn save_to_store(&mut self, store: &dyn RevenueStore) -> Result<(), RevenueError> {
        let batch = self.pending_batch()?;
        let accounts = self.dirty.len();
        store.commit(batch)?;
        self.dirty.clear();
        tracing::debug!(accounts, "token state committed");
        Ok(())
    }

    /// Restore a token from `store`. The event journal starts empty.
    pub fn load_from_store(store: &dyn RevenueStore) -> Result<Self, RevenueError> {
        let meta_bytes = store.get_meta(TOKEN_META_KEY)?.ok_or_else(|| {
            StoreError::NotFound("token meta record".to_string())
        })?;
        let meta: TokenMeta = bincode::deserialize(&meta_bytes)?;

        let mut accounts = HashMap::new();
        let mut records = HashMap::new();
        for (account, bytes) in store.iter_accounts()? {
            let record: AccountRecord = bincode::deserialize(&bytes)?;
            if let Some(claims) = record.claims {
                records.insert(account.clone(), claims);
            }
            accounts.insert(account, record.ledger);
        }

        let ledger = Ledger::from_parts(accounts, meta.total_units, meta.genesis_sealed);
        if ledger.sum_of_balances() != ledger.total_units() {
            return Err(StoreError::Corruption(format!(
                "balances sum to {} but total units is {}",
                ledger.sum_of_balances(),
                ledger.total_units()
            ))
            .into());
        }

        tracing::debug!(
            accounts = ledger.account_count(),
            snapshot_id = meta.snapshots.current_id(),
            "token state loaded"
        );

        Ok(Self {
            params: meta.params,
            ledger,
            snapshots: meta.snapshots,
            claims: ClaimEngine::from_records(records),
            redemption: meta.redemption,
            custody: meta.custody,
            journal: Vec::new(),
            dirty: BTreeSet::new(),
        })
    }

    fn pending_batch(&self) -> Result<WriteBatch, RevenueError> {
        let mut batch = WriteBatch::new();
        for account in &self.dirty {
            let record = AccountRecord {
                ledger: self.ledger.account(account).cloned().unwrap_or_default(),
                claims: self.claims.record(account).copied(),
            };
            batch.put_account(account, bincode::serialize(&record)?);
        }

        let meta = TokenMeta {
            params: self.params.clone(),
            total_units: self.ledger.total_units(),
            genesis_sealed: self.ledger.is_genesis_sealed(),
            snapshots: self.snapshots.clone(),
            redemption: self.redemption,
            custody: self.custody,
        };
        batch.put_meta(TOKEN_META_KEY, bincode::serialize(&meta)?);
        Ok(batch)
    }
}
