//! Nullable infrastructure for deterministic testing.
//!
//! The clock and the storage substrate are abstracted behind traits
//! ([`Clock`](revshare_types::Clock), [`RevenueStore`](revshare_store::RevenueStore)).
//! This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::NullStore;
