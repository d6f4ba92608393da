//! Pre-built [`tracing::Span`] constructors for host operations.
//!
//! Consistent span names and fields make every log line emitted while an
//! operation runs searchable by operation and account.

use tracing::{info_span, Span};

/// Span covering one operation from execution through commit.
pub fn operation_span(operation: &str) -> Span {
    info_span!("operation", op = %operation)
}

/// Span covering one operation performed for a specific account.
pub fn account_operation_span(operation: &str, account: &str) -> Span {
    info_span!("operation", op = %operation, account = %account)
}

/// Span covering the initial load or creation of the token state.
pub fn open_span() -> Span {
    info_span!("open")
}
