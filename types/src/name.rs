//! Account names and permission levels.
//!
//! Names follow the on-chain account rules: 1 to 12 characters drawn from
//! `a-z`, `1-5` and `.`, never ending in `.`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// An account identity, e.g. `parslseed123`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    pub const MAX_LEN: usize = 12;

    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        let well_formed = !s.is_empty()
            && s.len() <= Self::MAX_LEN
            && s.bytes().all(|b| matches!(b, b'a'..=b'z' | b'1'..=b'5' | b'.'))
            && !s.ends_with('.');
        if !well_formed {
            return Err(TypesError::InvalidName(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw key bytes used by storage backends.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountName {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountName {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AccountName> for String {
    fn from(name: AccountName) -> Self {
        name.0
    }
}

/// An `actor@permission` pair attached to a request by the host after it
/// verified the corresponding signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionLevel {
    pub actor: AccountName,
    pub permission: AccountName,
}

impl PermissionLevel {
    pub const ACTIVE: &'static str = "active";

    pub fn new(actor: AccountName, permission: AccountName) -> Self {
        Self { actor, permission }
    }

    /// `actor@active`.
    pub fn active(actor: AccountName) -> Self {
        Self {
            actor,
            permission: AccountName(Self::ACTIVE.to_string()),
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.actor, self.permission)
    }
}

impl FromStr for PermissionLevel {
    type Err = TypesError;

    /// Accepts `actor@permission`, or a bare `actor` meaning `actor@active`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |_| TypesError::InvalidPermission(s.to_string());
        match s.split_once('@') {
            Some((actor, permission)) => Ok(Self {
                actor: AccountName::new(actor).map_err(invalid)?,
                permission: AccountName::new(permission).map_err(invalid)?,
            }),
            None => Ok(Self::active(AccountName::new(s).map_err(invalid)?)),
        }
    }
}

impl TryFrom<String> for PermissionLevel {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PermissionLevel> for String {
    fn from(level: PermissionLevel) -> Self {
        level.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for raw in ["parslseed123", "user1", "a", "eosio.token"] {
            assert_eq!(AccountName::new(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn test_invalid_names() {
        for raw in ["", "User1", "user6", "toolongname123", "trailing.", "has space"] {
            assert!(AccountName::new(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_permission_level_parsing() {
        let level: PermissionLevel = "user1@active".parse().unwrap();
        assert_eq!(level.actor.as_str(), "user1");
        assert_eq!(level.permission.as_str(), "active");
        assert_eq!(level.to_string(), "user1@active");

        let bare: PermissionLevel = "user2".parse().unwrap();
        assert_eq!(bare.to_string(), "user2@active");

        assert!("user1@".parse::<PermissionLevel>().is_err());
    }

    #[test]
    fn test_name_serde_rejects_malformed() {
        let ok: AccountName = serde_json::from_str("\"user3\"").unwrap();
        assert_eq!(ok.as_str(), "user3");
        assert!(serde_json::from_str::<AccountName>("\"USER3\"").is_err());
    }
}
