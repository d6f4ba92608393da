//! Balances, allowances and the mint/transfer/burn primitives.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::checkpoint::Checkpoints;
use crate::error::LedgerError;
use revshare_types::{AccountId, SnapshotId};

/// Everything the ledger stores for a single account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Current unit balance.
    pub balance: u128,
    /// Balance as of past snapshots, recorded on first change after each one.
    pub checkpoints: Checkpoints,
    /// Units each spender may move out of this account.
    pub allowances: BTreeMap<AccountId, u128>,
}

/// The unit ledger.
///
/// Invariant: the sum of all balances equals `total_units`. Minting is only
/// possible until [`Ledger::seal_genesis`] is called; afterwards the supply
/// can only shrink through burns.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    accounts: HashMap<AccountId, AccountState>,
    total_units: u128,
    genesis_sealed: bool,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted parts.
    pub fn from_parts(
        accounts: HashMap<AccountId, AccountState>,
        total_units: u128,
        genesis_sealed: bool,
    ) -> Self {
        Self {
            accounts,
            total_units,
            genesis_sealed,
        }
    }

    /// Credit newly issued units. Genesis only.
    pub fn mint(
        &mut self,
        account: &AccountId,
        amount: u128,
        current_id: SnapshotId,
    ) -> Result<(), LedgerError> {
        if self.genesis_sealed {
            return Err(LedgerError::GenesisClosed);
        }
        let total = self
            .total_units
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        let state = self.accounts.entry(account.clone()).or_default();
        state.checkpoints.record(current_id, state.balance);
        state.balance += amount;
        self.total_units = total;

        tracing::debug!(account = %account, amount, total, "units minted");
        Ok(())
    }

    /// Close the genesis window; every later [`Ledger::mint`] fails.
    pub fn seal_genesis(&mut self) {
        self.genesis_sealed = true;
    }

    pub fn is_genesis_sealed(&self) -> bool {
        self.genesis_sealed
    }

    /// Move `amount` units from `from` to `to`.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
        current_id: SnapshotId,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(from);
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        if from == to {
            // Balance is unchanged; still a valid checkpoint boundary.
            if let Some(state) = self.accounts.get_mut(from) {
                state.checkpoints.record(current_id, state.balance);
            }
            return Ok(());
        }

        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        let sender = self.accounts.entry(from.clone()).or_default();
        sender.checkpoints.record(current_id, sender.balance);
        sender.balance = available - amount;

        let receiver = self.accounts.entry(to.clone()).or_default();
        receiver.checkpoints.record(current_id, receiver.balance);
        receiver.balance = credited;

        tracing::debug!(from = %from, to = %to, amount, "units transferred");
        Ok(())
    }

    /// Destroy `amount` units held by `account`.
    pub fn burn(
        &mut self,
        account: &AccountId,
        amount: u128,
        current_id: SnapshotId,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(account);
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        let total = self
            .total_units
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;

        let state = self.accounts.entry(account.clone()).or_default();
        state.checkpoints.record(current_id, state.balance);
        state.balance = available - amount;
        self.total_units = total;

        tracing::debug!(account = %account, amount, total, "units burned");
        Ok(())
    }

    /// Set the allowance `spender` may move out of `owner`'s balance.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: u128) {
        let state = self.accounts.entry(owner.clone()).or_default();
        if amount == 0 {
            state.allowances.remove(spender);
        } else {
            state.allowances.insert(spender.clone(), amount);
        }
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.accounts
            .get(owner)
            .and_then(|s| s.allowances.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Transfer on behalf of `from`, consuming `spender`'s allowance.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
        current_id: SnapshotId,
    ) -> Result<(), LedgerError> {
        let allowed = self.allowance(from, spender);
        if amount > allowed {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }
        self.transfer(from, to, amount, current_id)?;
        self.approve(from, spender, allowed - amount);
        Ok(())
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.accounts.get(account).map_or(0, |s| s.balance)
    }

    pub fn total_units(&self) -> u128 {
        self.total_units
    }

    /// Balance of `account` as of snapshot `id`.
    ///
    /// The caller is responsible for `id` referring to a snapshot that has
    /// already been taken; later ids read as the live balance.
    pub fn balance_at(&self, account: &AccountId, id: SnapshotId) -> u128 {
        match self.accounts.get(account) {
            Some(state) => state.checkpoints.value_at(id).unwrap_or(state.balance),
            None => 0,
        }
    }

    pub fn account(&self, account: &AccountId) -> Option<&AccountState> {
        self.accounts.get(account)
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &AccountState)> {
        self.accounts.iter()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Sum of every balance; equals [`Ledger::total_units`] in every reachable state.
    pub fn sum_of_balances(&self) -> u128 {
        self.accounts.values().map(|s| s.balance).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(name: &str) -> AccountId {
        AccountId::new(name).unwrap()
    }

    fn genesis(supply: u128) -> Ledger {
        let mut ledger = Ledger::new();
        ledger.mint(&acct("genesis"), supply, 0).unwrap();
        ledger.seal_genesis();
        ledger
    }

    #[test]
    fn mint_after_seal_rejected() {
        let mut ledger = genesis(1000);
        assert_eq!(
            ledger.mint(&acct("genesis"), 1, 0),
            Err(LedgerError::GenesisClosed)
        );
        assert_eq!(ledger.total_units(), 1000);
    }

    #[test]
    fn transfer_moves_units() {
        let mut ledger = genesis(1000);
        ledger.transfer(&acct("genesis"), &acct("bob"), 300, 0).unwrap();
        assert_eq!(ledger.balance_of(&acct("genesis")), 700);
        assert_eq!(ledger.balance_of(&acct("bob")), 300);
        assert_eq!(ledger.sum_of_balances(), ledger.total_units());
    }

    #[test]
    fn transfer_insufficient_balance_leaves_state_untouched() {
        let mut ledger = genesis(1000);
        let err = ledger
            .transfer(&acct("bob"), &acct("genesis"), 1, 0)
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                needed: 1,
                available: 0
            }
        );
        assert_eq!(ledger.balance_of(&acct("genesis")), 1000);
        assert!(ledger.account(&acct("bob")).is_none());
    }

    #[test]
    fn self_transfer_is_a_no_op() {
        let mut ledger = genesis(1000);
        ledger.transfer(&acct("genesis"), &acct("genesis"), 400, 0).unwrap();
        assert_eq!(ledger.balance_of(&acct("genesis")), 1000);
    }

    #[test]
    fn burn_reduces_balance_and_supply() {
        let mut ledger = genesis(1000);
        ledger.burn(&acct("genesis"), 250, 0).unwrap();
        assert_eq!(ledger.balance_of(&acct("genesis")), 750);
        assert_eq!(ledger.total_units(), 750);

        let err = ledger.burn(&acct("genesis"), 751, 0).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.total_units(), 750);
    }

    #[test]
    fn balance_at_snapshot_is_immutable_after_changes() {
        let mut ledger = genesis(1000);
        // Snapshot 1 taken here: genesis=1000, bob=0.
        ledger.transfer(&acct("genesis"), &acct("bob"), 100, 1).unwrap();
        // Snapshot 2 taken here: genesis=900, bob=100.
        ledger.transfer(&acct("genesis"), &acct("bob"), 50, 2).unwrap();
        ledger.burn(&acct("bob"), 20, 2).unwrap();

        assert_eq!(ledger.balance_at(&acct("genesis"), 1), 1000);
        assert_eq!(ledger.balance_at(&acct("bob"), 1), 0);
        assert_eq!(ledger.balance_at(&acct("genesis"), 2), 900);
        assert_eq!(ledger.balance_at(&acct("bob"), 2), 100);
        // Nothing changed since snapshot 3 would have been taken.
        assert_eq!(ledger.balance_at(&acct("bob"), 3), 130);
        assert_eq!(ledger.balance_at(&acct("nobody"), 1), 0);
    }

    #[test]
    fn allowance_flow() {
        let mut ledger = genesis(1000);
        let (owner, spender, dest) = (acct("genesis"), acct("spender"), acct("dest"));

        ledger.approve(&owner, &spender, 300);
        assert_eq!(ledger.allowance(&owner, &spender), 300);

        ledger.transfer_from(&spender, &owner, &dest, 200, 0).unwrap();
        assert_eq!(ledger.allowance(&owner, &spender), 100);
        assert_eq!(ledger.balance_of(&dest), 200);

        let err = ledger
            .transfer_from(&spender, &owner, &dest, 101, 0)
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientAllowance {
                needed: 101,
                available: 100
            }
        );
        assert_eq!(ledger.balance_of(&dest), 200);
    }

    #[test]
    fn transfer_from_insufficient_balance_keeps_allowance() {
        let mut ledger = genesis(10);
        let (owner, spender) = (acct("genesis"), acct("spender"));
        ledger.approve(&owner, &spender, 100);

        let err = ledger
            .transfer_from(&spender, &owner, &spender, 50, 0)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.allowance(&owner, &spender), 100);
    }
}
