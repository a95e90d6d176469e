//! Action dispatcher.
//!
//! Every request passes the same gates in the same order before any handler
//! runs:
//!
//! 1. amount and symbol validation against the currency registry
//! 2. memo length
//! 3. authorization of the required signer
//!
//! Handlers then check state preconditions and stage their writes. The staged
//! writes are committed as one [`WriteBatch`](seed_store::WriteBatch); an error
//! anywhere discards them and the store is left exactly as it was.

use serde::Serialize;

use seed_store::{CurrencyStats, StoreOp, TokenStore};
use seed_types::{Asset, PermissionLevel, SymbolCode, Timestamp, TokenParams};

use crate::action::{Action, ActionName, ActionRequest, Authorizer};
use crate::auth;
use crate::staging::Staged;
use crate::TokenError;

/// Outcome of an accepted action: the rows it wrote or erased.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionReceipt {
    pub action: ActionName,
    pub changes: Vec<StoreOp>,
}

/// The token state machine over a storage backend.
pub struct TokenEngine<S> {
    pub(crate) store: S,
    pub(crate) params: TokenParams,
}

impl<S: TokenStore> TokenEngine<S> {
    pub fn new(store: S, params: TokenParams) -> Self {
        Self { store, params }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn params(&self) -> &TokenParams {
        &self.params
    }

    /// Apply one action at time `now`, all or nothing.
    pub fn apply(
        &self,
        request: &ActionRequest,
        now: Timestamp,
    ) -> Result<ActionReceipt, TokenError> {
        let action = &request.action;
        match self.execute(request, now) {
            Ok(receipt) => {
                tracing::debug!(
                    action = %receipt.action,
                    symbol = %action.symbol(),
                    changes = receipt.changes.len(),
                    "action applied"
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::debug!(
                    action = %action.name(),
                    kind = e.kind(),
                    error = %e,
                    "action rejected"
                );
                Err(e)
            }
        }
    }

    fn execute(&self, request: &ActionRequest, now: Timestamp) -> Result<ActionReceipt, TokenError> {
        let action = &request.action;
        let mut tx = Staged::new(&self.store);

        let stat = self.validate(&tx, action)?;
        self.authorize(action, stat.as_ref(), &request.authorization)?;
        self.dispatch(&mut tx, action, stat, now)?;

        let batch = tx.into_batch();
        let changes = batch.ops().to_vec();
        self.store.commit(batch)?;
        Ok(ActionReceipt {
            action: action.name(),
            changes,
        })
    }

    /// Amount, symbol and memo checks. Returns the registry row of the
    /// action's currency, if one exists.
    fn validate(
        &self,
        tx: &Staged<'_, S>,
        action: &Action,
    ) -> Result<Option<CurrencyStats>, TokenError> {
        if let Some(quantity) = action.quantity() {
            check_quantity(quantity)?;
        }

        let symbol = action.symbol();
        let stat = tx.stat(symbol.code())?;
        match (action, &stat) {
            (Action::Create { .. }, _) => {
                if symbol.precision() != self.params.precision {
                    return Err(TokenError::InvalidAmount(format!(
                        "symbol {symbol} must have precision {}",
                        self.params.precision
                    )));
                }
            }
            (_, None) => return Err(unknown_symbol(symbol.code())),
            (_, Some(stat)) => {
                if stat.supply.symbol() != symbol {
                    return Err(TokenError::InvalidAmount(format!(
                        "symbol precision mismatch: got {symbol}, registered {}",
                        stat.supply.symbol()
                    )));
                }
            }
        }

        if let Some(memo) = action.memo() {
            if memo.len() > self.params.max_memo_bytes {
                return Err(TokenError::MemoTooLong {
                    len: memo.len(),
                    max: self.params.max_memo_bytes,
                });
            }
        }
        Ok(stat)
    }

    fn authorize(
        &self,
        action: &Action,
        stat: Option<&CurrencyStats>,
        authorization: &[PermissionLevel],
    ) -> Result<(), TokenError> {
        let signer = match action.authorizer() {
            Authorizer::Account(account) => account,
            Authorizer::Issuer(code) => match stat {
                Some(stat) => stat.issuer.clone(),
                None => return Err(unknown_symbol(&code)),
            },
        };
        auth::require_auth(authorization, &signer)
    }

    fn dispatch(
        &self,
        tx: &mut Staged<'_, S>,
        action: &Action,
        stat: Option<CurrencyStats>,
        now: Timestamp,
    ) -> Result<(), TokenError> {
        match action {
            Action::Create { issuer, maximum_supply } => {
                self.create(tx, stat, issuer, maximum_supply)
            }
            Action::Update { issuer, maximum_supply } => {
                self.update(tx, known(stat, action)?, issuer, maximum_supply)
            }
            Action::Issue { to, quantity, .. } => self.issue(tx, known(stat, action)?, to, quantity),
            Action::Transfer { from, to, quantity, .. } => {
                self.transfer(tx, &known(stat, action)?, from, to, quantity)
            }
            Action::Claim { owner, sym } => self.claim(tx, owner, sym.code()),
            Action::Recover { owner, .. } => self.recover(tx, &known(stat, action)?, owner),
            Action::Stake { owner, quantity } => self.stake(tx, owner, quantity, now),
            Action::Unstake { owner, quantity } => self.unstake(tx, owner, quantity, now),
            Action::Refund { owner, sym } => self.refund(tx, owner, sym.code(), now),
            Action::Rewarddrop { from, to, quantity, .. } => {
                self.rewarddrop(tx, known(stat, action)?, from, to, quantity, now)
            }
        }
    }
}

/// A quantity must be in range and strictly positive.
fn check_quantity(quantity: &Asset) -> Result<(), TokenError> {
    if !quantity.is_valid() {
        return Err(TokenError::InvalidAmount(format!(
            "magnitude of {quantity} is too large"
        )));
    }
    if !quantity.is_positive() {
        return Err(TokenError::InvalidAmount(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    Ok(())
}

fn known(stat: Option<CurrencyStats>, action: &Action) -> Result<CurrencyStats, TokenError> {
    stat.ok_or_else(|| unknown_symbol(action.symbol().code()))
}

fn unknown_symbol(code: &SymbolCode) -> TokenError {
    TokenError::InvalidAmount(format!("token with symbol {code} does not exist"))
}

/// Checked arithmetic failure on an otherwise valid quantity.
pub(crate) fn out_of_range(quantity: &Asset) -> TokenError {
    TokenError::InvalidAmount(format!("{quantity} overflows the representable range"))
}
