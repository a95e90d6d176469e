//! Token-specific errors.
//!
//! Every rejection leaves the ledger untouched; the variant tells the caller
//! which precondition failed.

use seed_store::StoreError;
use seed_types::{AccountName, Asset, SymbolCode, Timestamp};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token with symbol {0} already exists")]
    AlreadyExists(SymbolCode),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("missing required authority of {0}")]
    Unauthorized(AccountName),

    #[error("overdrawn balance: {account} needs {needed}, has {available}")]
    InsufficientBalance {
        account: AccountName,
        needed: Asset,
        available: Asset,
    },

    #[error("overdrawn stake: {account} needs {needed}, has {available} staked")]
    InsufficientStake {
        account: AccountName,
        needed: Asset,
        available: Asset,
    },

    #[error("quantity {quantity} exceeds available supply {available}")]
    SupplyExceeded { quantity: Asset, available: Asset },

    #[error("no refunding entry found for {0}")]
    NothingToRefund(AccountName),

    #[error("refund not yet available: matures at {maturity}, now {now}")]
    RefundNotMatured { maturity: Timestamp, now: Timestamp },

    #[error("memo has {len} bytes, limit is {max}")]
    MemoTooLong { len: usize, max: usize },

    #[error("max-supply {requested} cannot be less than current supply {supply}")]
    MaxSupplyBelowSupply { requested: Asset, supply: Asset },

    #[error("no balance object found for {0}")]
    BalanceNotFound(AccountName),

    #[error("no unclaimed balance to recover from {0}")]
    NothingToRecover(AccountName),

    #[error("invalid table query: {0}")]
    InvalidQuery(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl TokenError {
    /// Stable identifying name of the failure, independent of its message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyExists(_) => "AlreadyExists",
            Self::InvalidAmount(_) => "InvalidAmount",
            Self::Unauthorized(_) => "Unauthorized",
            Self::InsufficientBalance { .. } => "InsufficientBalance",
            Self::InsufficientStake { .. } => "InsufficientStake",
            Self::SupplyExceeded { .. } => "SupplyExceeded",
            Self::NothingToRefund(_) => "NothingToRefund",
            Self::RefundNotMatured { .. } => "RefundNotMatured",
            Self::MemoTooLong { .. } => "MemoTooLong",
            Self::MaxSupplyBelowSupply { .. } => "MaxSupplyBelowSupply",
            Self::BalanceNotFound(_) => "BalanceNotFound",
            Self::NothingToRecover(_) => "NothingToRecover",
            Self::InvalidQuery(_) => "InvalidQuery",
            Self::Store(_) => "Store",
        }
    }
}
