//! Write batching: every row change of one action, committed as a unit.
//!
//! The engine stages its mutations into a [`WriteBatch`] and hands the batch
//! to [`TokenStore::commit`](crate::TokenStore::commit). Backends must apply
//! either all operations or none of them.

use seed_types::{AccountName, SymbolCode};
use serde::{Deserialize, Serialize};

use crate::balance::BalanceRow;
use crate::refund::RefundRow;
use crate::stake::StakeRow;
use crate::stat::CurrencyStats;

/// One row-level write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StoreOp {
    PutStat(CurrencyStats),
    PutBalance { owner: AccountName, row: BalanceRow },
    EraseBalance { owner: AccountName, code: SymbolCode },
    PutStake { owner: AccountName, row: StakeRow },
    EraseStake { owner: AccountName, code: SymbolCode },
    PutRefund { owner: AccountName, row: RefundRow },
    EraseRefund { owner: AccountName, code: SymbolCode },
}

/// An ordered list of writes to apply atomically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<StoreOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: StoreOp) {
        self.ops.push(op);
    }

    pub fn put_stat(&mut self, stat: CurrencyStats) {
        self.push(StoreOp::PutStat(stat));
    }

    pub fn put_balance(&mut self, owner: AccountName, row: BalanceRow) {
        self.push(StoreOp::PutBalance { owner, row });
    }

    pub fn erase_balance(&mut self, owner: AccountName, code: SymbolCode) {
        self.push(StoreOp::EraseBalance { owner, code });
    }

    pub fn put_stake(&mut self, owner: AccountName, row: StakeRow) {
        self.push(StoreOp::PutStake { owner, row });
    }

    pub fn erase_stake(&mut self, owner: AccountName, code: SymbolCode) {
        self.push(StoreOp::EraseStake { owner, code });
    }

    pub fn put_refund(&mut self, owner: AccountName, row: RefundRow) {
        self.push(StoreOp::PutRefund { owner, row });
    }

    pub fn erase_refund(&mut self, owner: AccountName, code: SymbolCode) {
        self.push(StoreOp::EraseRefund { owner, code });
    }

    pub fn ops(&self) -> &[StoreOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<StoreOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
