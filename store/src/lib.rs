//! Abstract storage traits for the SEED token ledger.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The engine depends only on the traits.
//!
//! Four tables back the state machine, each keyed by symbol code within a
//! scope: `stat` (scope: symbol), `accounts`, `stake` and `refund` (scope:
//! owner account).

pub mod balance;
pub mod batch;
pub mod error;
pub mod refund;
pub mod stake;
pub mod stat;

pub use balance::{BalanceRow, BalanceStore};
pub use batch::{StoreOp, WriteBatch};
pub use error::StoreError;
pub use refund::{RefundRow, RefundStore};
pub use stake::{StakeRow, StakeStore};
pub use stat::{CurrencyStats, StatStore};

/// A complete backend for the token state machine.
///
/// Reads go through the per-table traits; writes only ever arrive as a
/// [`WriteBatch`] so that an action's mutations land together or not at all.
pub trait TokenStore: StatStore + BalanceStore + StakeStore + RefundStore {
    /// Apply every operation in `batch` atomically.
    ///
    /// On error the store must be left exactly as it was before the call.
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
