//! Burn-triggered redemption accumulator.
//!
//! The vault tracks custodied inflow since the last burn. A burn of `amount`
//! units redeems
//!
//! ```text
//! vault * amount * percent_redeemable / total_units / 100
//! ```
//!
//! with `total_units` taken *before* the burn, and then empties the vault no
//! matter how small the burn was. Whatever was not redeemed stays in custody.

use serde::{Deserialize, Serialize};

use crate::error::RevenueError;
use revshare_types::PERCENT_DENOMINATOR;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionAccumulator {
    vault: u128,
}

impl RedemptionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vault(&self) -> u128 {
        self.vault
    }

    /// Credit an external inflow. Claim payouts never reach this.
    pub fn record_inflow(&mut self, amount: u128) -> Result<(), RevenueError> {
        self.vault = self
            .vault
            .checked_add(amount)
            .ok_or(RevenueError::Overflow)?;
        Ok(())
    }

    /// Value redeemable by burning `amount` out of `total_units` (pre-burn).
    pub fn redeemable(
        &self,
        amount: u128,
        total_units: u128,
        percent_redeemable: u128,
    ) -> Result<u128, RevenueError> {
        if total_units == 0 {
            return Ok(0);
        }
        let scaled = self
            .vault
            .checked_mul(amount)
            .and_then(|v| v.checked_mul(percent_redeemable))
            .ok_or(RevenueError::Overflow)?;
        Ok(scaled / total_units / PERCENT_DENOMINATOR)
    }

    /// Empty the vault; called by every burn.
    pub fn reset(&mut self) {
        self.vault = 0;
    }
}
