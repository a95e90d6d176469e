//! Nullable infrastructure for deterministic testing.
//!
//! The engine's external dependencies (the host clock and the storage
//! backend) are abstracted away. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem
//!
//! Usage: swap real implementations for nullables in tests, or embed
//! [`NullStore`] directly when an in-memory ledger is all a host needs.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::{NullStore, StoreSnapshot};
