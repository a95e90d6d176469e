//! Currency registry storage (`stat` table, one row per symbol).

use crate::StoreError;
use seed_types::{AccountName, Asset, SymbolCode};
use serde::{Deserialize, Serialize};

/// Supply bounds and issuer of one currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyStats {
    /// Current circulating supply; its symbol is fixed at creation.
    pub supply: Asset,
    pub max_supply: Asset,
    pub issuer: AccountName,
}

impl CurrencyStats {
    pub fn code(&self) -> &SymbolCode {
        self.supply.code()
    }

    /// Raw amount that may still be minted.
    pub fn headroom(&self) -> i64 {
        self.max_supply.amount() - self.supply.amount()
    }
}

/// Trait for currency registry storage.
pub trait StatStore {
    fn get_stat(&self, code: &SymbolCode) -> Result<Option<CurrencyStats>, StoreError>;

    /// All registered currencies ordered by symbol code.
    fn iter_stats(&self) -> Result<Vec<CurrencyStats>, StoreError>;
}
