//! LMDB implementation of StakeStore.

use seed_store::{StakeRow, StakeStore, StoreError};
use seed_types::{AccountName, SymbolCode};

use crate::environment::row_key;
use crate::LmdbEnvironment;

impl StakeStore for LmdbEnvironment {
    fn get_stake(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<StakeRow>, StoreError> {
        Ok(self.get_row(self.stakes_db, &row_key(owner, code))?)
    }

    fn stakes_of(&self, owner: &AccountName) -> Result<Vec<StakeRow>, StoreError> {
        Ok(self.owner_rows(self.stakes_db, owner)?)
    }

    fn stake_holders(
        &self,
        code: &SymbolCode,
    ) -> Result<Vec<(AccountName, StakeRow)>, StoreError> {
        Ok(self.scan_rows(self.stakes_db, |_, c| c == code)?)
    }
}
