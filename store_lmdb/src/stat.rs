//! LMDB implementation of StatStore.

use seed_store::{CurrencyStats, StatStore, StoreError};
use seed_types::SymbolCode;

use crate::LmdbEnvironment;

impl StatStore for LmdbEnvironment {
    fn get_stat(&self, code: &SymbolCode) -> Result<Option<CurrencyStats>, StoreError> {
        Ok(self.get_row(self.stats_db, code.as_bytes())?)
    }

    fn iter_stats(&self) -> Result<Vec<CurrencyStats>, StoreError> {
        Ok(self.scan_values(self.stats_db)?)
    }
}
