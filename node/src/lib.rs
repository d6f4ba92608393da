//! Host harness for the revenue-sharing ledger.
//!
//! The host is the collaborator the ledger core expects around it:
//! - Loads configuration and installs structured logging
//! - Supplies the current time and the account identities of callers
//! - Runs one operation at a time and commits its effects atomically
//! - Publishes committed events to subscribers

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod logging;
pub mod tracing_spans;

pub use config::HostConfig;
pub use error::NodeError;
pub use events::EventBus;
pub use host::TokenHost;
pub use logging::{init_logging, LogFormat};
