//! LMDB storage backend for the SEED token ledger.
//!
//! Implements all storage traits from `seed-store` using the `heed` LMDB bindings.
//! Each table maps to one LMDB database within a single environment; rows are
//! `bincode`-encoded.

pub mod balance;
pub mod environment;
pub mod error;
pub mod refund;
pub mod stake;
pub mod stat;
pub mod write_batch;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
