//! Token parameters fixed at construction.
//!
//! `percent_claimable` splits every unit of custodied inflow between the
//! periodic claim pools (that percentage) and burn redemption (the rest).

use serde::{Deserialize, Serialize};

use crate::error::RevshareError;

/// Denominator for every percentage in the ledger.
pub const PERCENT_DENOMINATOR: u128 = 100;

/// Default snapshot interval: 90 days.
pub const DEFAULT_MIN_SNAPSHOT_INTERVAL_SECS: u64 = 90 * 24 * 3600;

/// Construction parameters of a revenue-sharing token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParams {
    /// Human-readable token name.
    pub name: String,

    /// Ticker symbol.
    pub symbol: String,

    /// Units minted to the genesis account at construction.
    pub initial_supply: u128,

    /// Share of each period's custodied inflow that becomes claimable, in [0, 100].
    pub percent_claimable: u8,

    /// Minimum number of seconds between two snapshots.
    pub min_snapshot_interval_secs: u64,
}

impl TokenParams {
    /// Check that the parameters describe a constructible token.
    pub fn validate(&self) -> Result<(), RevshareError> {
        if u128::from(self.percent_claimable) > PERCENT_DENOMINATOR {
            return Err(RevshareError::InvalidConfiguration(format!(
                "percent_claimable must be in [0, 100], got {}",
                self.percent_claimable
            )));
        }
        Ok(())
    }

    /// Percentage of inflow reserved for burn redemption.
    pub fn percent_redeemable(&self) -> u128 {
        PERCENT_DENOMINATOR.saturating_sub(u128::from(self.percent_claimable))
    }
}

impl Default for TokenParams {
    fn default() -> Self {
        Self {
            name: "Revenue Share".to_string(),
            symbol: "RVS".to_string(),
            initial_supply: 1_000_000_000,
            percent_claimable: 80,
            min_snapshot_interval_secs: DEFAULT_MIN_SNAPSHOT_INTERVAL_SECS,
        }
    }
}
