//! SEED token state machine.
//!
//! A fungible-token ledger with four tables (currency registry, liquid
//! balances, stakes and pending refunds) and ten actions. The engine is a
//! deterministic core: it never reads the clock or verifies signatures.
//! The host passes the current time and the permission levels it verified
//! with each request.
//!
//! ```text
//!   ActionRequest ──► validate ──► authorize ──► handler ──► WriteBatch ──► TokenStore::commit
//! ```

pub mod action;
pub mod audit;
pub mod auth;
pub mod engine;
pub mod error;
mod ledger;
mod registry;
mod staging;
mod staking;
pub mod tables;

pub use action::{Action, ActionName, ActionRequest, Authorizer};
pub use audit::SupplyAudit;
pub use engine::{ActionReceipt, TokenEngine};
pub use error::TokenError;
pub use tables::{Table, TableRows};
