//! Fundamental types for the SEED token ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account names, permission levels, symbols, fixed-point assets, timestamps and
//! engine parameters.

pub mod asset;
pub mod error;
pub mod name;
pub mod params;
pub mod symbol;
pub mod time;

pub use asset::Asset;
pub use error::TypesError;
pub use name::{AccountName, PermissionLevel};
pub use params::{RefundWindow, TokenParams};
pub use symbol::{Symbol, SymbolCode};
pub use time::Timestamp;
