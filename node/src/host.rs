//! The token host. Runs one operation at a time and commits its effects.
//!
//! Every mutating call follows the same path:
//!
//! 1. run the operation against the in-memory [`RevenueToken`];
//! 2. on success, write the touched state to the store in one batch;
//! 3. once committed, hand the operation's events to the [`EventBus`].
//!
//! A rejected operation leaves the token untouched and commits nothing. If
//! the commit itself fails, the host reloads the last committed state so
//! memory never runs ahead of the store.

use revshare_revenue::{RevenueError, RevenueToken};
use revshare_store::{RevenueStore, StoreError};
use revshare_types::{AccountId, Clock, SnapshotId, Timestamp};

use crate::config::HostConfig;
use crate::events::EventBus;
use crate::tracing_spans::{account_operation_span, open_span, operation_span};
use crate::NodeError;

pub struct TokenHost<S: RevenueStore, C: Clock> {
    token: RevenueToken,
    store: S,
    clock: C,
    events: EventBus,
}

impl<S: RevenueStore, C: Clock> TokenHost<S, C> {
    /// Load the token from `store`, or create it from `config` if the store
    /// is empty.
    pub fn open(
        config: &HostConfig,
        store: S,
        clock: C,
        events: EventBus,
    ) -> Result<Self, NodeError> {
        let span = open_span();
        let _enter = span.enter();

        let mut token = match RevenueToken::load_from_store(&store) {
            Ok(token) => {
                tracing::info!(
                    symbol = token.symbol(),
                    snapshot_id = token.current_snapshot_id(),
                    "token state loaded from store"
                );
                token
            }
            Err(RevenueError::Store(StoreError::NotFound(_))) => {
                let params = config.token_params()?;
                let genesis = config.genesis_account()?;
                let mut token = RevenueToken::new(params, &genesis, clock.now())?;
                token.save_to_store(&store)?;
                token
            }
            Err(e) => return Err(e.into()),
        };

        for event in token.drain_events() {
            events.emit(&event);
        }

        Ok(Self {
            token,
            store,
            clock,
            events,
        })
    }

    /// Read access to the committed token state.
    pub fn token(&self) -> &RevenueToken {
        &self.token
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    // ── Operations ──────────────────────────────────────────────────────

    pub fn deposit(&mut self, amount: u128) -> Result<(), NodeError> {
        let span = operation_span("deposit");
        let _enter = span.enter();
        self.execute(|token, _| token.deposit(amount))
    }

    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), NodeError> {
        let span = account_operation_span("transfer", from.as_str());
        let _enter = span.enter();
        self.execute(|token, _| token.transfer(from, to, amount))
    }

    pub fn approve(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: u128,
    ) -> Result<(), NodeError> {
        let span = account_operation_span("approve", owner.as_str());
        let _enter = span.enter();
        self.execute(|token, _| {
            token.approve(owner, spender, amount);
            Ok(())
        })
    }

    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), NodeError> {
        let span = account_operation_span("transfer_from", spender.as_str());
        let _enter = span.enter();
        self.execute(|token, _| token.transfer_from(spender, from, to, amount))
    }

    /// Burn units; returns the redeemed custodied value.
    pub fn burn(&mut self, account: &AccountId, amount: u128) -> Result<u128, NodeError> {
        let span = account_operation_span("burn", account.as_str());
        let _enter = span.enter();
        self.execute(|token, _| token.burn(account, amount))
    }

    /// Take a snapshot at the clock's current time.
    pub fn snapshot(&mut self) -> Result<SnapshotId, NodeError> {
        let span = operation_span("snapshot");
        let _enter = span.enter();
        self.execute(|token, now| token.snapshot(now))
    }

    pub fn claim(&mut self, account: &AccountId, id: SnapshotId) -> Result<u128, NodeError> {
        let span = account_operation_span("claim", account.as_str());
        let _enter = span.enter();
        self.execute(|token, _| token.claim(account, id))
    }

    pub fn claim_batch(
        &mut self,
        account: &AccountId,
        ids: &[SnapshotId],
    ) -> Result<u128, NodeError> {
        let span = account_operation_span("claim_batch", account.as_str());
        let _enter = span.enter();
        self.execute(|token, _| token.claim_batch(account, ids))
    }

    fn execute<T>(
        &mut self,
        op: impl FnOnce(&mut RevenueToken, Timestamp) -> Result<T, RevenueError>,
    ) -> Result<T, NodeError> {
        let now = self.clock.now();
        let output = match op(&mut self.token, now) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(error = %e, "operation rejected");
                return Err(e.into());
            }
        };

        if let Err(e) = self.token.save_to_store(&self.store) {
            tracing::error!(error = %e, "commit failed, restoring last committed state");
            self.token = RevenueToken::load_from_store(&self.store)?;
            return Err(e.into());
        }

        for event in self.token.drain_events() {
            self.events.emit(&event);
        }
        Ok(output)
    }
}
