//! Actions accepted by the dispatcher and the authority each one requires.

use serde::{Deserialize, Serialize};
use std::fmt;

use seed_types::{AccountName, Asset, PermissionLevel, Symbol, SymbolCode};

/// Name of a supported action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionName {
    Create,
    Update,
    Issue,
    Transfer,
    Claim,
    Recover,
    Stake,
    Unstake,
    Refund,
    Rewarddrop,
}

impl ActionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Issue => "issue",
            Self::Transfer => "transfer",
            Self::Claim => "claim",
            Self::Recover => "recover",
            Self::Stake => "stake",
            Self::Unstake => "unstake",
            Self::Refund => "refund",
            Self::Rewarddrop => "rewarddrop",
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One state transition with its parameters.
///
/// Serialized as `{"name": "transfer", "data": {...}}`, mirroring how hosts
/// submit named actions with a fixed parameter schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "data", rename_all = "lowercase")]
pub enum Action {
    Create {
        issuer: AccountName,
        maximum_supply: Asset,
    },
    Update {
        issuer: AccountName,
        maximum_supply: Asset,
    },
    Issue {
        to: AccountName,
        quantity: Asset,
        #[serde(default)]
        memo: String,
    },
    Transfer {
        from: AccountName,
        to: AccountName,
        quantity: Asset,
        #[serde(default)]
        memo: String,
    },
    Claim {
        owner: AccountName,
        sym: Symbol,
    },
    Recover {
        owner: AccountName,
        sym: Symbol,
    },
    Stake {
        owner: AccountName,
        quantity: Asset,
    },
    Unstake {
        owner: AccountName,
        quantity: Asset,
    },
    Refund {
        owner: AccountName,
        sym: Symbol,
    },
    Rewarddrop {
        from: AccountName,
        to: AccountName,
        quantity: Asset,
        #[serde(default)]
        memo: String,
    },
}

/// The identity whose authority an action must carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Authorizer {
    /// A specific account named in the action's parameters.
    Account(AccountName),
    /// Whoever is registered as issuer of the currency.
    Issuer(SymbolCode),
}

impl Action {
    pub fn name(&self) -> ActionName {
        match self {
            Self::Create { .. } => ActionName::Create,
            Self::Update { .. } => ActionName::Update,
            Self::Issue { .. } => ActionName::Issue,
            Self::Transfer { .. } => ActionName::Transfer,
            Self::Claim { .. } => ActionName::Claim,
            Self::Recover { .. } => ActionName::Recover,
            Self::Stake { .. } => ActionName::Stake,
            Self::Unstake { .. } => ActionName::Unstake,
            Self::Refund { .. } => ActionName::Refund,
            Self::Rewarddrop { .. } => ActionName::Rewarddrop,
        }
    }

    /// The currency this action is scoped to.
    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::Create { maximum_supply, .. } | Self::Update { maximum_supply, .. } => {
                maximum_supply.symbol()
            }
            Self::Issue { quantity, .. }
            | Self::Transfer { quantity, .. }
            | Self::Stake { quantity, .. }
            | Self::Unstake { quantity, .. }
            | Self::Rewarddrop { quantity, .. } => quantity.symbol(),
            Self::Claim { sym, .. } | Self::Recover { sym, .. } | Self::Refund { sym, .. } => sym,
        }
    }

    /// The quantity moved or bounded by this action, if it carries one.
    pub fn quantity(&self) -> Option<&Asset> {
        match self {
            Self::Create { maximum_supply, .. } | Self::Update { maximum_supply, .. } => {
                Some(maximum_supply)
            }
            Self::Issue { quantity, .. }
            | Self::Transfer { quantity, .. }
            | Self::Stake { quantity, .. }
            | Self::Unstake { quantity, .. }
            | Self::Rewarddrop { quantity, .. } => Some(quantity),
            Self::Claim { .. } | Self::Recover { .. } | Self::Refund { .. } => None,
        }
    }

    pub fn memo(&self) -> Option<&str> {
        match self {
            Self::Issue { memo, .. } | Self::Transfer { memo, .. } | Self::Rewarddrop { memo, .. } => {
                Some(memo)
            }
            _ => None,
        }
    }

    /// The authority this action must be signed with.
    pub fn authorizer(&self) -> Authorizer {
        match self {
            Self::Create { issuer, .. } => Authorizer::Account(issuer.clone()),
            Self::Transfer { from, .. } => Authorizer::Account(from.clone()),
            Self::Claim { owner, .. }
            | Self::Stake { owner, .. }
            | Self::Unstake { owner, .. }
            | Self::Refund { owner, .. } => Authorizer::Account(owner.clone()),
            Self::Update { .. } | Self::Issue { .. } | Self::Recover { .. } | Self::Rewarddrop { .. } => {
                Authorizer::Issuer(self.symbol().code().clone())
            }
        }
    }

    /// Wrap this action in a request signed by `actor@active`.
    pub fn signed_by(self, actor: &AccountName) -> ActionRequest {
        ActionRequest::new(self, vec![PermissionLevel::active(actor.clone())])
    }
}

/// An action together with the permission levels the host verified for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub authorization: Vec<PermissionLevel>,
    pub action: Action,
}

impl ActionRequest {
    pub fn new(action: Action, authorization: Vec<PermissionLevel>) -> Self {
        Self {
            authorization,
            action,
        }
    }
}
