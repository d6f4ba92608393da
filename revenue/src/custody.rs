//! The custodied settlement asset held on behalf of unit holders.

use serde::{Deserialize, Serialize};

use crate::error::RevenueError;

/// Balance of the external asset held by the ledger.
///
/// Grows only through external deposits and shrinks only through claim
/// payouts and burn redemptions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Custody {
    balance: u128,
}

impl Custody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> u128 {
        self.balance
    }

    /// Accept an external inflow.
    pub fn deposit(&mut self, amount: u128) -> Result<(), RevenueError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(RevenueError::Overflow)?;
        Ok(())
    }

    /// Fail unless `amount` can be paid out.
    pub fn ensure_available(&self, amount: u128) -> Result<(), RevenueError> {
        if amount > self.balance {
            return Err(RevenueError::InsufficientCustody {
                needed: amount,
                available: self.balance,
            });
        }
        Ok(())
    }

    /// Pay `amount` out of custody.
    pub fn withdraw(&mut self, amount: u128) -> Result<(), RevenueError> {
        self.ensure_available(amount)?;
        self.balance -= amount;
        Ok(())
    }
}
