//! Host configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use revshare_types::{params::DEFAULT_MIN_SNAPSHOT_INTERVAL_SECS, AccountId, TokenParams};

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for a token host.
///
/// Can be loaded from a TOML file via [`HostConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Token parameters only matter the
/// first time a host opens an empty store; afterwards the persisted token
/// wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Token name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Token symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Units minted to the genesis account.
    #[serde(default = "default_initial_supply")]
    pub initial_supply: u64,

    /// Share of each period's inflow that becomes claimable, 0 to 100.
    #[serde(default = "default_percent_claimable")]
    pub percent_claimable: u8,

    /// Minimum seconds between snapshots.
    #[serde(default = "default_min_snapshot_interval_secs")]
    pub min_snapshot_interval_secs: u64,

    /// Account that receives the initial supply.
    #[serde(default = "default_genesis_account")]
    pub genesis_account: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_name() -> String {
    "Revenue Share".to_string()
}

fn default_symbol() -> String {
    "RVS".to_string()
}

fn default_initial_supply() -> u64 {
    1_000_000_000
}

fn default_percent_claimable() -> u8 {
    80
}

fn default_min_snapshot_interval_secs() -> u64 {
    DEFAULT_MIN_SNAPSHOT_INTERVAL_SECS
}

fn default_genesis_account() -> String {
    "genesis".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl HostConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Validated construction parameters for a new token.
    pub fn token_params(&self) -> Result<TokenParams, NodeError> {
        let params = TokenParams {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            initial_supply: u128::from(self.initial_supply),
            percent_claimable: self.percent_claimable,
            min_snapshot_interval_secs: self.min_snapshot_interval_secs,
        };
        params
            .validate()
            .map_err(|e| NodeError::Config(e.to_string()))?;
        Ok(params)
    }

    pub fn genesis_account(&self) -> Result<AccountId, NodeError> {
        AccountId::new(self.genesis_account.as_str()).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            initial_supply: default_initial_supply(),
            percent_claimable: default_percent_claimable(),
            min_snapshot_interval_secs: default_min_snapshot_interval_secs(),
            genesis_account: default_genesis_account(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
