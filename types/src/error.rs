//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while building the fundamental types.
#[derive(Debug, Error)]
pub enum RevshareError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid account identifier: {0:?}")]
    InvalidAccount(String),
}
