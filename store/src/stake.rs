//! Staked balance storage (`stake` table, scoped by owner).

use crate::StoreError;
use seed_types::{AccountName, Asset, SymbolCode, Timestamp};
use serde::{Deserialize, Serialize};

/// Tokens an account has locked into staking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRow {
    pub quantity: Asset,
    /// Time of the last stake, unstake or reward drop touching this row.
    pub updated_on: Timestamp,
}

/// Trait for staked balance storage.
pub trait StakeStore {
    fn get_stake(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<StakeRow>, StoreError>;

    fn stakes_of(&self, owner: &AccountName) -> Result<Vec<StakeRow>, StoreError>;

    fn stake_holders(&self, code: &SymbolCode)
        -> Result<Vec<(AccountName, StakeRow)>, StoreError>;
}
