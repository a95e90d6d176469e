//! Parse and validation errors for the fundamental types.

use thiserror::Error;

/// Errors raised when constructing names, symbols and assets from text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid account name: {0:?}")]
    InvalidName(String),

    #[error("invalid permission level: {0:?}")]
    InvalidPermission(String),

    #[error("invalid symbol code: {0:?}")]
    InvalidSymbolCode(String),

    #[error("invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("invalid asset: {0:?}")]
    InvalidAsset(String),

    #[error("asset amount out of range: {0:?}")]
    AmountOutOfRange(String),
}
