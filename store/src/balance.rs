//! Liquid balance storage (`accounts` table, scoped by owner).

use crate::StoreError;
use seed_types::{AccountName, Asset, SymbolCode};
use serde::{Deserialize, Serialize};

/// An account's spendable balance of one currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub balance: Asset,
    /// False while the row only holds tokens credited by the issuer and the
    /// owner has not acted on it yet. Unclaimed rows can be recovered.
    pub claimed: bool,
}

/// Trait for liquid balance storage.
pub trait BalanceStore {
    fn get_balance(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<BalanceRow>, StoreError>;

    /// Every balance row held by `owner`, ordered by symbol code.
    fn balances_of(&self, owner: &AccountName) -> Result<Vec<BalanceRow>, StoreError>;

    /// Every holder of `code`, ordered by account name.
    fn balance_holders(
        &self,
        code: &SymbolCode,
    ) -> Result<Vec<(AccountName, BalanceRow)>, StoreError>;
}
