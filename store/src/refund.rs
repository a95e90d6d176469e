//! Pending refund storage (`refund` table, scoped by owner).

use crate::StoreError;
use seed_types::{AccountName, Asset, SymbolCode, Timestamp};
use serde::{Deserialize, Serialize};

/// Unstaked tokens waiting out the refund delay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundRow {
    pub quantity: Asset,
    /// Time of the most recent unstake feeding this row.
    pub request_time: Timestamp,
    /// Earliest time `refund` may release the quantity.
    pub maturity: Timestamp,
}

impl RefundRow {
    pub fn is_mature(&self, now: Timestamp) -> bool {
        self.maturity.has_passed(now)
    }
}

/// Trait for pending refund storage.
pub trait RefundStore {
    fn get_refund(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<RefundRow>, StoreError>;

    fn refunds_of(&self, owner: &AccountName) -> Result<Vec<RefundRow>, StoreError>;

    fn refund_holders(
        &self,
        code: &SymbolCode,
    ) -> Result<Vec<(AccountName, RefundRow)>, StoreError>;
}
