//! Nullable store: thread-safe in-memory storage for testing.

use seed_store::{
    BalanceRow, BalanceStore, CurrencyStats, RefundRow, RefundStore, StakeRow, StakeStore,
    StatStore, StoreError, StoreOp, TokenStore, WriteBatch,
};
use seed_types::{AccountName, SymbolCode};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

type RowKey = (AccountName, SymbolCode);

/// A full copy of the four tables, comparable for equality.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub stats: BTreeMap<SymbolCode, CurrencyStats>,
    pub balances: BTreeMap<RowKey, BalanceRow>,
    pub stakes: BTreeMap<RowKey, StakeRow>,
    pub refunds: BTreeMap<RowKey, RefundRow>,
}

/// An in-memory token store.
///
/// All tables sit behind one lock so a batch commit is atomic.
pub struct NullStore {
    tables: Mutex<StoreSnapshot>,
    fail_commits: AtomicBool,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(StoreSnapshot::default()),
            fail_commits: AtomicBool::new(false),
        }
    }

    /// Make every subsequent commit fail with a backend error (or stop doing so).
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Copy out the current contents of every table.
    pub fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        Ok(self.tables()?.clone())
    }

    fn tables(&self) -> Result<MutexGuard<'_, StoreSnapshot>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("null store lock poisoned".into()))
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

fn owned_by<R: Clone>(rows: &BTreeMap<RowKey, R>, owner: &AccountName) -> Vec<R> {
    rows.iter()
        .filter(|((o, _), _)| o == owner)
        .map(|(_, row)| row.clone())
        .collect()
}

fn held_in<R: Clone>(rows: &BTreeMap<RowKey, R>, code: &SymbolCode) -> Vec<(AccountName, R)> {
    rows.iter()
        .filter(|((_, c), _)| c == code)
        .map(|((owner, _), row)| (owner.clone(), row.clone()))
        .collect()
}

impl StatStore for NullStore {
    fn get_stat(&self, code: &SymbolCode) -> Result<Option<CurrencyStats>, StoreError> {
        Ok(self.tables()?.stats.get(code).cloned())
    }

    fn iter_stats(&self) -> Result<Vec<CurrencyStats>, StoreError> {
        Ok(self.tables()?.stats.values().cloned().collect())
    }
}

impl BalanceStore for NullStore {
    fn get_balance(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<BalanceRow>, StoreError> {
        let key = (owner.clone(), code.clone());
        Ok(self.tables()?.balances.get(&key).cloned())
    }

    fn balances_of(&self, owner: &AccountName) -> Result<Vec<BalanceRow>, StoreError> {
        Ok(owned_by(&self.tables()?.balances, owner))
    }

    fn balance_holders(
        &self,
        code: &SymbolCode,
    ) -> Result<Vec<(AccountName, BalanceRow)>, StoreError> {
        Ok(held_in(&self.tables()?.balances, code))
    }
}

impl StakeStore for NullStore {
    fn get_stake(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<StakeRow>, StoreError> {
        let key = (owner.clone(), code.clone());
        Ok(self.tables()?.stakes.get(&key).cloned())
    }

    fn stakes_of(&self, owner: &AccountName) -> Result<Vec<StakeRow>, StoreError> {
        Ok(owned_by(&self.tables()?.stakes, owner))
    }

    fn stake_holders(
        &self,
        code: &SymbolCode,
    ) -> Result<Vec<(AccountName, StakeRow)>, StoreError> {
        Ok(held_in(&self.tables()?.stakes, code))
    }
}

impl RefundStore for NullStore {
    fn get_refund(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<RefundRow>, StoreError> {
        let key = (owner.clone(), code.clone());
        Ok(self.tables()?.refunds.get(&key).cloned())
    }

    fn refunds_of(&self, owner: &AccountName) -> Result<Vec<RefundRow>, StoreError> {
        Ok(owned_by(&self.tables()?.refunds, owner))
    }

    fn refund_holders(
        &self,
        code: &SymbolCode,
    ) -> Result<Vec<(AccountName, RefundRow)>, StoreError> {
        Ok(held_in(&self.tables()?.refunds, code))
    }
}

impl TokenStore for NullStore {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected commit failure".into()));
        }
        let mut tables = self.tables()?;
        for op in batch.into_ops() {
            match op {
                StoreOp::PutStat(stat) => {
                    tables.stats.insert(stat.code().clone(), stat);
                }
                StoreOp::PutBalance { owner, row } => {
                    tables.balances.insert((owner, row.balance.code().clone()), row);
                }
                StoreOp::EraseBalance { owner, code } => {
                    tables.balances.remove(&(owner, code));
                }
                StoreOp::PutStake { owner, row } => {
                    tables.stakes.insert((owner, row.quantity.code().clone()), row);
                }
                StoreOp::EraseStake { owner, code } => {
                    tables.stakes.remove(&(owner, code));
                }
                StoreOp::PutRefund { owner, row } => {
                    tables.refunds.insert((owner, row.quantity.code().clone()), row);
                }
                StoreOp::EraseRefund { owner, code } => {
                    tables.refunds.remove(&(owner, code));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_types::{Asset, Timestamp};

    fn name(s: &str) -> AccountName {
        AccountName::new(s).unwrap()
    }

    fn seed(text: &str) -> Asset {
        text.parse().unwrap()
    }

    #[test]
    fn test_commit_applies_puts_and_erases() {
        let store = NullStore::new();
        let mut batch = WriteBatch::new();
        batch.put_balance(name("user1"), BalanceRow { balance: seed("5.0000 SEED"), claimed: true });
        batch.put_stake(
            name("user1"),
            StakeRow { quantity: seed("1.0000 SEED"), updated_on: Timestamp::new(10) },
        );
        store.commit(batch).unwrap();

        let code = SymbolCode::new("SEED").unwrap();
        assert_eq!(store.get_balance(&name("user1"), &code).unwrap().unwrap().balance, seed("5.0000 SEED"));
        assert_eq!(store.stake_holders(&code).unwrap().len(), 1);

        let mut batch = WriteBatch::new();
        batch.erase_stake(name("user1"), code.clone());
        store.commit(batch).unwrap();
        assert!(store.get_stake(&name("user1"), &code).unwrap().is_none());
    }

    #[test]
    fn test_failed_commit_leaves_tables_untouched() {
        let store = NullStore::new();
        let before = store.snapshot().unwrap();
        store.fail_commits(true);

        let mut batch = WriteBatch::new();
        batch.put_balance(name("user2"), BalanceRow { balance: seed("1.0000 SEED"), claimed: false });
        assert!(matches!(store.commit(batch), Err(StoreError::Backend(_))));
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[test]
    fn test_rows_are_scoped_by_owner_and_symbol() {
        let store = NullStore::new();
        let mut batch = WriteBatch::new();
        batch.put_balance(name("user1"), BalanceRow { balance: seed("1.0000 SEED"), claimed: true });
        batch.put_balance(name("user1"), BalanceRow { balance: seed("2.0000 TREE"), claimed: true });
        batch.put_balance(name("user2"), BalanceRow { balance: seed("3.0000 SEED"), claimed: true });
        store.commit(batch).unwrap();

        assert_eq!(store.balances_of(&name("user1")).unwrap().len(), 2);
        let holders = store.balance_holders(&SymbolCode::new("SEED").unwrap()).unwrap();
        let owners: Vec<_> = holders.iter().map(|(o, _)| o.as_str()).collect();
        assert_eq!(owners, ["user1", "user2"]);
    }
}
