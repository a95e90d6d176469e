//! Atomic batch commit: every operation of a [`WriteBatch`] is applied in a
//! single LMDB write transaction.
//!
//! If any operation fails, the transaction is dropped without calling
//! `commit` and LMDB discards all of its writes.

use heed::RwTxn;

use seed_store::{StoreError, StoreOp, TokenStore, WriteBatch};

use crate::environment::{encode, row_key};
use crate::{LmdbEnvironment, LmdbError};

impl LmdbEnvironment {
    fn apply_op(&self, wtxn: &mut RwTxn<'_>, op: &StoreOp) -> Result<(), LmdbError> {
        match op {
            StoreOp::PutStat(stat) => {
                self.stats_db.put(wtxn, stat.code().as_bytes(), &encode(stat)?)?;
            }
            StoreOp::PutBalance { owner, row } => {
                let key = row_key(owner, row.balance.code());
                self.balances_db.put(wtxn, &key, &encode(row)?)?;
            }
            StoreOp::EraseBalance { owner, code } => {
                self.balances_db.delete(wtxn, &row_key(owner, code))?;
            }
            StoreOp::PutStake { owner, row } => {
                let key = row_key(owner, row.quantity.code());
                self.stakes_db.put(wtxn, &key, &encode(row)?)?;
            }
            StoreOp::EraseStake { owner, code } => {
                self.stakes_db.delete(wtxn, &row_key(owner, code))?;
            }
            StoreOp::PutRefund { owner, row } => {
                let key = row_key(owner, row.quantity.code());
                self.refunds_db.put(wtxn, &key, &encode(row)?)?;
            }
            StoreOp::EraseRefund { owner, code } => {
                self.refunds_db.delete(wtxn, &row_key(owner, code))?;
            }
        }
        Ok(())
    }
}

impl TokenStore for LmdbEnvironment {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut wtxn = self.env().write_txn().map_err(LmdbError::from)?;
        for op in batch.ops() {
            self.apply_op(&mut wtxn, op)?;
        }
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::trace!(ops = batch.len(), "committed write batch");
        Ok(())
    }
}
