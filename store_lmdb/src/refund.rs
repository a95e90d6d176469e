//! LMDB implementation of RefundStore.

use seed_store::{RefundRow, RefundStore, StoreError};
use seed_types::{AccountName, SymbolCode};

use crate::environment::row_key;
use crate::LmdbEnvironment;

impl RefundStore for LmdbEnvironment {
    fn get_refund(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<RefundRow>, StoreError> {
        Ok(self.get_row(self.refunds_db, &row_key(owner, code))?)
    }

    fn refunds_of(&self, owner: &AccountName) -> Result<Vec<RefundRow>, StoreError> {
        Ok(self.owner_rows(self.refunds_db, owner)?)
    }

    fn refund_holders(
        &self,
        code: &SymbolCode,
    ) -> Result<Vec<(AccountName, RefundRow)>, StoreError> {
        Ok(self.scan_rows(self.refunds_db, |_, c| c == code)?)
    }
}
