//! LMDB implementation of BalanceStore.

use seed_store::{BalanceRow, BalanceStore, StoreError};
use seed_types::{AccountName, SymbolCode};

use crate::environment::row_key;
use crate::LmdbEnvironment;

impl BalanceStore for LmdbEnvironment {
    fn get_balance(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<BalanceRow>, StoreError> {
        Ok(self.get_row(self.balances_db, &row_key(owner, code))?)
    }

    fn balances_of(&self, owner: &AccountName) -> Result<Vec<BalanceRow>, StoreError> {
        Ok(self.owner_rows(self.balances_db, owner)?)
    }

    fn balance_holders(
        &self,
        code: &SymbolCode,
    ) -> Result<Vec<(AccountName, BalanceRow)>, StoreError> {
        Ok(self.scan_rows(self.balances_db, |_, c| c == code)?)
    }
}
