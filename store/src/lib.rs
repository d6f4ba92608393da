//! Abstract storage traits for the revenue-sharing ledger.
//!
//! The host supplies a transactional key-value substrate; every backend
//! implements [`RevenueStore`]. The ledger crates depend only on the trait
//! and serialize their own records into opaque bytes.

pub mod batch;
pub mod error;
pub mod revenue;

pub use batch::{BatchOp, WriteBatch};
pub use error::StoreError;
pub use revenue::RevenueStore;
