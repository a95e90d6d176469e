//! Shared utilities for the SEED ledger.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use time::{describe_maturity, format_duration};
