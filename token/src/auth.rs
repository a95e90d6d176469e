//! Authorization gate.

use seed_types::{AccountName, PermissionLevel};

use crate::TokenError;

/// Whether any verified permission level was granted by `account`.
pub fn has_auth(authorization: &[PermissionLevel], account: &AccountName) -> bool {
    authorization.iter().any(|level| &level.actor == account)
}

pub fn require_auth(
    authorization: &[PermissionLevel],
    account: &AccountName,
) -> Result<(), TokenError> {
    if has_auth(authorization, account) {
        Ok(())
    } else {
        Err(TokenError::Unauthorized(account.clone()))
    }
}
