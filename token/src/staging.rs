//! Write staging for a single action.
//!
//! Handlers read through a [`Staged`] overlay and record their writes in it.
//! Nothing touches the store until the overlay is turned into a
//! [`WriteBatch`] and committed, so a rejected action leaves no trace.

use std::collections::BTreeMap;

use seed_store::{
    BalanceRow, CurrencyStats, RefundRow, StakeRow, StoreError, TokenStore, WriteBatch,
};
use seed_types::{AccountName, SymbolCode};

type RowKey = (AccountName, SymbolCode);

/// Pending writes layered over a store. `None` marks an erased row.
pub(crate) struct Staged<'s, S> {
    store: &'s S,
    stats: BTreeMap<SymbolCode, CurrencyStats>,
    balances: BTreeMap<RowKey, Option<BalanceRow>>,
    stakes: BTreeMap<RowKey, Option<StakeRow>>,
    refunds: BTreeMap<RowKey, Option<RefundRow>>,
}

impl<'s, S: TokenStore> Staged<'s, S> {
    pub(crate) fn new(store: &'s S) -> Self {
        Self {
            store,
            stats: BTreeMap::new(),
            balances: BTreeMap::new(),
            stakes: BTreeMap::new(),
            refunds: BTreeMap::new(),
        }
    }

    pub(crate) fn stat(&self, code: &SymbolCode) -> Result<Option<CurrencyStats>, StoreError> {
        match self.stats.get(code) {
            Some(stat) => Ok(Some(stat.clone())),
            None => self.store.get_stat(code),
        }
    }

    pub(crate) fn balance(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<BalanceRow>, StoreError> {
        match self.balances.get(&key(owner, code)) {
            Some(staged) => Ok(staged.clone()),
            None => self.store.get_balance(owner, code),
        }
    }

    pub(crate) fn stake(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<StakeRow>, StoreError> {
        match self.stakes.get(&key(owner, code)) {
            Some(staged) => Ok(staged.clone()),
            None => self.store.get_stake(owner, code),
        }
    }

    pub(crate) fn refund(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<RefundRow>, StoreError> {
        match self.refunds.get(&key(owner, code)) {
            Some(staged) => Ok(staged.clone()),
            None => self.store.get_refund(owner, code),
        }
    }

    pub(crate) fn put_stat(&mut self, stat: CurrencyStats) {
        self.stats.insert(stat.code().clone(), stat);
    }

    pub(crate) fn put_balance(&mut self, owner: &AccountName, row: BalanceRow) {
        let key = key(owner, row.balance.code());
        self.balances.insert(key, Some(row));
    }

    pub(crate) fn erase_balance(&mut self, owner: &AccountName, code: &SymbolCode) {
        self.balances.insert(key(owner, code), None);
    }

    pub(crate) fn put_stake(&mut self, owner: &AccountName, row: StakeRow) {
        let key = key(owner, row.quantity.code());
        self.stakes.insert(key, Some(row));
    }

    pub(crate) fn erase_stake(&mut self, owner: &AccountName, code: &SymbolCode) {
        self.stakes.insert(key(owner, code), None);
    }

    pub(crate) fn put_refund(&mut self, owner: &AccountName, row: RefundRow) {
        let key = key(owner, row.quantity.code());
        self.refunds.insert(key, Some(row));
    }

    pub(crate) fn erase_refund(&mut self, owner: &AccountName, code: &SymbolCode) {
        self.refunds.insert(key(owner, code), None);
    }

    /// Final state of every touched row, in table then key order.
    pub(crate) fn into_batch(self) -> WriteBatch {
        let mut batch = WriteBatch::new();
        for stat in self.stats.into_values() {
            batch.put_stat(stat);
        }
        for ((owner, code), row) in self.balances {
            match row {
                Some(row) => batch.put_balance(owner, row),
                None => batch.erase_balance(owner, code),
            }
        }
        for ((owner, code), row) in self.stakes {
            match row {
                Some(row) => batch.put_stake(owner, row),
                None => batch.erase_stake(owner, code),
            }
        }
        for ((owner, code), row) in self.refunds {
            match row {
                Some(row) => batch.put_refund(owner, row),
                None => batch.erase_refund(owner, code),
            }
        }
        batch
    }
}

fn key(owner: &AccountName, code: &SymbolCode) -> RowKey {
    (owner.clone(), code.clone())
}
