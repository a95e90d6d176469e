//! Balance ledger: liquid balances, `transfer`, `claim` and `recover`.

use seed_store::{BalanceRow, CurrencyStats, TokenStore};
use seed_types::{AccountName, Asset, SymbolCode};

use crate::engine::{out_of_range, TokenEngine};
use crate::staging::Staged;
use crate::TokenError;

impl<S: TokenStore> TokenEngine<S> {
    pub(crate) fn transfer(
        &self,
        tx: &mut Staged<'_, S>,
        stat: &CurrencyStats,
        from: &AccountName,
        to: &AccountName,
        quantity: &Asset,
    ) -> Result<(), TokenError> {
        debit_balance(tx, from, quantity)?;
        let claimed = to == &stat.issuer || from != &stat.issuer;
        credit_balance(tx, to, quantity, claimed)?;
        tracing::debug!(%from, %to, %quantity, "transferred");
        Ok(())
    }

    pub(crate) fn claim(
        &self,
        tx: &mut Staged<'_, S>,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<(), TokenError> {
        let row = tx
            .balance(owner, code)?
            .ok_or_else(|| TokenError::BalanceNotFound(owner.clone()))?;
        if !row.claimed {
            tx.put_balance(owner, BalanceRow { claimed: true, ..row });
            tracing::debug!(%owner, %code, "balance claimed");
        }
        Ok(())
    }

    /// Return an unclaimed balance to the issuer.
    pub(crate) fn recover(
        &self,
        tx: &mut Staged<'_, S>,
        stat: &CurrencyStats,
        owner: &AccountName,
    ) -> Result<(), TokenError> {
        let nothing = || TokenError::NothingToRecover(owner.clone());
        if owner == &stat.issuer {
            return Err(nothing());
        }
        let row = match tx.balance(owner, stat.code())? {
            Some(row) if !row.claimed => row,
            _ => return Err(nothing()),
        };
        tx.erase_balance(owner, stat.code());
        credit_balance(tx, &stat.issuer, &row.balance, true)?;
        tracing::debug!(%owner, quantity = %row.balance, "unclaimed balance recovered");
        Ok(())
    }
}

/// Remove `quantity` from a liquid balance. A row that reaches zero is erased;
/// a row that remains is marked claimed since its owner acted on it.
pub(crate) fn debit_balance<S: TokenStore>(
    tx: &mut Staged<'_, S>,
    owner: &AccountName,
    quantity: &Asset,
) -> Result<(), TokenError> {
    let code = quantity.code();
    let available = match tx.balance(owner, code)? {
        Some(row) => row.balance,
        None => Asset::zero(quantity.symbol().clone()),
    };
    if available.amount() < quantity.amount() {
        return Err(TokenError::InsufficientBalance {
            account: owner.clone(),
            needed: quantity.clone(),
            available,
        });
    }
    let remaining = available
        .checked_sub(quantity)
        .ok_or_else(|| out_of_range(quantity))?;
    if remaining.is_zero() {
        tx.erase_balance(owner, code);
    } else {
        tx.put_balance(
            owner,
            BalanceRow {
                balance: remaining,
                claimed: true,
            },
        );
    }
    Ok(())
}

/// Add `quantity` to a liquid balance, creating the row on first credit.
/// An existing row never loses its claimed flag.
pub(crate) fn credit_balance<S: TokenStore>(
    tx: &mut Staged<'_, S>,
    owner: &AccountName,
    quantity: &Asset,
    claimed: bool,
) -> Result<(), TokenError> {
    let row = match tx.balance(owner, quantity.code())? {
        Some(row) => BalanceRow {
            balance: row
                .balance
                .checked_add(quantity)
                .ok_or_else(|| out_of_range(quantity))?,
            claimed: row.claimed || claimed,
        },
        None => BalanceRow {
            balance: quantity.clone(),
            claimed,
        },
    };
    tx.put_balance(owner, row);
    Ok(())
}
