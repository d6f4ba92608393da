//! The revenue-sharing token: one owned accounting state, one method per operation.
//!
//! Every mutating method validates first and mutates last, so a returned
//! error always leaves the token exactly as it was.

use std::collections::BTreeSet;

use crate::claims::ClaimEngine;
use crate::custody::Custody;
use crate::error::RevenueError;
use crate::events::TokenEvent;
use crate::pool::RevenuePool;
use crate::redemption::RedemptionAccumulator;
use crate::snapshot::{Snapshot, SnapshotManager};
use revshare_ledger::Ledger;
use revshare_types::{AccountId, SnapshotId, Timestamp, TokenParams};

/// Fixed display precision of a unit.
pub const DECIMALS: u8 = 18;

#[derive(Clone, Debug)]
pub struct RevenueToken {
    pub(crate) params: TokenParams,
    pub(crate) ledger: Ledger,
    pub(crate) snapshots: SnapshotManager,
    pub(crate) claims: ClaimEngine,
    pub(crate) redemption: RedemptionAccumulator,
    pub(crate) custody: Custody,
    pub(crate) journal: Vec<TokenEvent>,
    /// Accounts touched since the last save.
    pub(crate) dirty: BTreeSet<AccountId>,
}

impl RevenueToken {
    /// Construct the token and mint the whole supply to `genesis`.
    pub fn new(
        params: TokenParams,
        genesis: &AccountId,
        now: Timestamp,
    ) -> Result<Self, RevenueError> {
        params.validate()?;

        let mut ledger = Ledger::new();
        ledger.mint(genesis, params.initial_supply, 0)?;
        ledger.seal_genesis();

        tracing::info!(
            name = %params.name,
            symbol = %params.symbol,
            supply = params.initial_supply,
            percent_claimable = params.percent_claimable,
            genesis = %genesis,
            "token created"
        );

        let journal = vec![TokenEvent::Transfer {
            from: None,
            to: Some(genesis.clone()),
            amount: params.initial_supply,
        }];

        Ok(Self {
            snapshots: SnapshotManager::new(params.min_snapshot_interval_secs, now),
            params,
            ledger,
            claims: ClaimEngine::new(),
            redemption: RedemptionAccumulator::new(),
            custody: Custody::new(),
            journal,
            dirty: BTreeSet::from([genesis.clone()]),
        })
    }

    // ── Metadata ────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.params.name
    }

    pub fn symbol(&self) -> &str {
        &self.params.symbol
    }

    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    pub fn percent_claimable(&self) -> u8 {
        self.params.percent_claimable
    }

    /// Minimum seconds between snapshots.
    pub fn min_snapshot_interval(&self) -> u64 {
        self.params.min_snapshot_interval_secs
    }

    pub fn params(&self) -> &TokenParams {
        &self.params
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.ledger.balance_of(account)
    }

    pub fn total_units(&self) -> u128 {
        self.ledger.total_units()
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.ledger.allowance(owner, spender)
    }

    pub fn current_snapshot_id(&self) -> SnapshotId {
        self.snapshots.current_id()
    }

    pub fn last_snapshot_timestamp(&self) -> Timestamp {
        self.snapshots.last_snapshot_timestamp()
    }

    pub fn snapshot_record(&self, id: SnapshotId) -> Option<&Snapshot> {
        self.snapshots.get(id)
    }

    pub fn pool(&self, slot: usize) -> Option<&RevenuePool> {
        self.snapshots.pool(slot)
    }

    pub fn custodied_balance(&self) -> u128 {
        self.custody.balance()
    }

    /// Inflow accumulated since the last burn.
    pub fn vault(&self) -> u128 {
        self.redemption.vault()
    }

    /// Whether `account` claimed snapshot `id`. Only meaningful for the two
    /// ids still in the claim window; older flags are overwritten by later
    /// claims through the same slot.
    pub fn is_claimed(&self, account: &AccountId, id: SnapshotId) -> bool {
        self.claims.is_claimed(account, id)
    }

    /// Balance of `account` when snapshot `id` was taken.
    pub fn balance_at_snapshot(
        &self,
        account: &AccountId,
        id: SnapshotId,
    ) -> Result<u128, RevenueError> {
        self.ensure_taken(id)?;
        Ok(self.ledger.balance_at(account, id))
    }

    pub fn total_units_at_snapshot(&self, id: SnapshotId) -> Result<u128, RevenueError> {
        self.snapshots.total_units_at(id)
    }

    /// Revenue `account` would receive by claiming snapshot `id` now.
    pub fn claimable_revenue(
        &self,
        account: &AccountId,
        id: SnapshotId,
    ) -> Result<u128, RevenueError> {
        self.claims
            .claimable_revenue(account, id, &self.snapshots, &self.ledger)
    }

    /// Value a burn of `amount` units would redeem right now.
    pub fn redeemable_on_burn(&self, amount: u128) -> Result<u128, RevenueError> {
        self.redemption.redeemable(
            amount,
            self.ledger.total_units(),
            self.params.percent_redeemable(),
        )
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Passive inflow: external value entered custody.
    pub fn deposit(&mut self, amount: u128) -> Result<(), RevenueError> {
        let mut custody = self.custody;
        let mut redemption = self.redemption;
        custody.deposit(amount)?;
        redemption.record_inflow(amount)?;

        self.custody = custody;
        self.redemption = redemption;
        tracing::debug!(amount, custodied = custody.balance(), "deposit received");
        self.journal.push(TokenEvent::Deposit { amount });
        Ok(())
    }

    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), RevenueError> {
        self.ledger
            .transfer(from, to, amount, self.snapshots.current_id())?;
        self.dirty.insert(from.clone());
        self.dirty.insert(to.clone());
        self.journal.push(TokenEvent::Transfer {
            from: Some(from.clone()),
            to: Some(to.clone()),
            amount,
        });
        Ok(())
    }

    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: u128) {
        self.ledger.approve(owner, spender, amount);
        self.dirty.insert(owner.clone());
        self.journal.push(TokenEvent::Approval {
            owner: owner.clone(),
            spender: spender.clone(),
            amount,
        });
    }

    /// Move units out of `from` on its behalf, consuming `spender`'s allowance.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), RevenueError> {
        self.ledger
            .transfer_from(spender, from, to, amount, self.snapshots.current_id())?;
        self.dirty.insert(from.clone());
        self.dirty.insert(to.clone());
        self.journal.push(TokenEvent::Transfer {
            from: Some(from.clone()),
            to: Some(to.clone()),
            amount,
        });
        Ok(())
    }

    /// Burn `amount` units and pay out the redeemable share of the vault.
    ///
    /// The payout is priced against the supply before the burn. The vault is
    /// emptied whatever the size of the burn. Returns the redeemed value.
    pub fn burn(&mut self, account: &AccountId, amount: u128) -> Result<u128, RevenueError> {
        let available = self.ledger.balance_of(account);
        if amount > available {
            return Err(RevenueError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        let redeemed = self.redeemable_on_burn(amount)?;
        self.custody.ensure_available(redeemed)?;

        self.ledger
            .burn(account, amount, self.snapshots.current_id())?;
        self.custody.withdraw(redeemed)?;
        self.snapshots.record_outflow(redeemed);
        self.redemption.reset();

        tracing::info!(
            account = %account,
            amount,
            redeemed,
            total_units = self.ledger.total_units(),
            "burn settled"
        );
        self.dirty.insert(account.clone());
        self.journal.push(TokenEvent::Transfer {
            from: Some(account.clone()),
            to: None,
            amount,
        });
        self.journal.push(TokenEvent::BurnSettled {
            account: account.clone(),
            amount,
            redeemed,
        });
        Ok(redeemed)
    }

    /// Take the next snapshot at `now` and return its id.
    pub fn snapshot(&mut self, now: Timestamp) -> Result<SnapshotId, RevenueError> {
        let outcome = self.snapshots.take(
            now,
            self.custody.balance(),
            self.ledger.total_units(),
            self.params.percent_claimable,
        )?;
        self.journal.push(TokenEvent::SnapshotTaken {
            id: outcome.id,
            timestamp: now,
            period_revenue: outcome.period_revenue,
        });
        Ok(outcome.id)
    }

    /// Claim revenue for a single snapshot.
    pub fn claim(&mut self, account: &AccountId, id: SnapshotId) -> Result<u128, RevenueError> {
        self.claim_batch(account, &[id])
    }

    /// Claim several snapshots in order with one payout. All or nothing.
    pub fn claim_batch(
        &mut self,
        account: &AccountId,
        ids: &[SnapshotId],
    ) -> Result<u128, RevenueError> {
        let plan = self
            .claims
            .prepare(account, ids, &self.snapshots, &self.ledger)?;
        self.custody.ensure_available(plan.total)?;
        if plan.settled.is_empty() {
            return Ok(0);
        }

        self.custody.withdraw(plan.total)?;
        self.snapshots.record_outflow(plan.total);
        self.claims.commit(&plan);

        self.dirty.insert(account.clone());
        for &(snapshot_id, amount) in &plan.settled {
            self.journal.push(TokenEvent::ClaimSettled {
                account: account.clone(),
                snapshot_id,
                amount,
            });
        }
        Ok(plan.total)
    }

    /// Take every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<TokenEvent> {
        std::mem::take(&mut self.journal)
    }

    /// Sum of every balance; equals [`RevenueToken::total_units`].
    pub fn sum_of_balances(&self) -> u128 {
        self.ledger.sum_of_balances()
    }

    fn ensure_taken(&self, id: SnapshotId) -> Result<(), RevenueError> {
        let current = self.snapshots.current_id();
        if id == 0 || id > current {
            return Err(RevenueError::InvalidSnapshot { id, current });
        }
        Ok(())
    }
}
