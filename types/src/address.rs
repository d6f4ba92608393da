//! Account identifier supplied by the host environment.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RevshareError;

/// An opaque account identifier.
///
/// The host authenticates callers and hands the ledger an already-resolved
/// identity; the ledger only requires it to be non-empty and comparable.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account id from any non-empty string.
    pub fn new(raw: impl Into<String>) -> Result<Self, RevshareError> {
        let s = raw.into();
        if s.trim().is_empty() {
            return Err(RevshareError::InvalidAccount(s));
        }
        Ok(Self(s))
    }

    /// Return the raw account string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AccountId {
    type Error = RevshareError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for AccountId {
    type Error = RevshareError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}
