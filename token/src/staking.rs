//! Staking state machine.
//!
//! Per `(account, symbol)` tokens move between three ledgers:
//!
//! ```text
//!   Liquid --stake--> Staked --unstake--> Pending-Refund --refund--> Liquid
//!                       ^
//!   (minted) --rewarddrop
//! ```
//!
//! `refund` only succeeds once the host-supplied time reaches the row's
//! maturity. How repeated unstakes treat an existing maturity is governed
//! by [`RefundWindow`].

use seed_store::{CurrencyStats, RefundRow, StakeRow, TokenStore};
use seed_types::{AccountName, Asset, RefundWindow, SymbolCode, Timestamp};

use crate::engine::{out_of_range, TokenEngine};
use crate::ledger::{credit_balance, debit_balance};
use crate::registry::mint;
use crate::staging::Staged;
use crate::TokenError;

impl<S: TokenStore> TokenEngine<S> {
    pub(crate) fn stake(
        &self,
        tx: &mut Staged<'_, S>,
        owner: &AccountName,
        quantity: &Asset,
        now: Timestamp,
    ) -> Result<(), TokenError> {
        debit_balance(tx, owner, quantity)?;
        add_stake(tx, owner, quantity, now)?;
        tracing::debug!(%owner, %quantity, "staked");
        Ok(())
    }

    pub(crate) fn unstake(
        &self,
        tx: &mut Staged<'_, S>,
        owner: &AccountName,
        quantity: &Asset,
        now: Timestamp,
    ) -> Result<(), TokenError> {
        let code = quantity.code();
        let staked = match tx.stake(owner, code)? {
            Some(row) => row.quantity,
            None => Asset::zero(quantity.symbol().clone()),
        };
        if staked.amount() < quantity.amount() {
            return Err(TokenError::InsufficientStake {
                account: owner.clone(),
                needed: quantity.clone(),
                available: staked,
            });
        }
        let remaining = staked
            .checked_sub(quantity)
            .ok_or_else(|| out_of_range(quantity))?;
        if remaining.is_zero() {
            tx.erase_stake(owner, code);
        } else {
            tx.put_stake(
                owner,
                StakeRow {
                    quantity: remaining,
                    updated_on: now,
                },
            );
        }

        let fresh_maturity = now.plus_secs(self.params.refund_delay_secs);
        let row = match tx.refund(owner, code)? {
            Some(pending) => RefundRow {
                quantity: pending
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| out_of_range(quantity))?,
                request_time: now,
                maturity: match self.params.refund_window {
                    RefundWindow::Reset => fresh_maturity,
                    RefundWindow::Preserve => pending.maturity,
                },
            },
            None => RefundRow {
                quantity: quantity.clone(),
                request_time: now,
                maturity: fresh_maturity,
            },
        };
        tracing::debug!(%owner, %quantity, maturity = %row.maturity, "unstaked");
        tx.put_refund(owner, row);
        Ok(())
    }

    pub(crate) fn refund(
        &self,
        tx: &mut Staged<'_, S>,
        owner: &AccountName,
        code: &SymbolCode,
        now: Timestamp,
    ) -> Result<(), TokenError> {
        let pending = tx
            .refund(owner, code)?
            .ok_or_else(|| TokenError::NothingToRefund(owner.clone()))?;
        if !pending.is_mature(now) {
            return Err(TokenError::RefundNotMatured {
                maturity: pending.maturity,
                now,
            });
        }
        tx.erase_refund(owner, code);
        credit_balance(tx, owner, &pending.quantity, true)?;
        tracing::debug!(%owner, quantity = %pending.quantity, "refunded");
        Ok(())
    }

    /// Mint `quantity` straight into `to`'s stake.
    pub(crate) fn rewarddrop(
        &self,
        tx: &mut Staged<'_, S>,
        stat: CurrencyStats,
        from: &AccountName,
        to: &AccountName,
        quantity: &Asset,
        now: Timestamp,
    ) -> Result<(), TokenError> {
        if from != &stat.issuer {
            return Err(TokenError::Unauthorized(from.clone()));
        }
        let stat = mint(tx, stat, quantity)?;
        add_stake(tx, to, quantity, now)?;
        tracing::debug!(%to, %quantity, supply = %stat.supply, "reward dropped");
        Ok(())
    }
}

fn add_stake<S: TokenStore>(
    tx: &mut Staged<'_, S>,
    owner: &AccountName,
    quantity: &Asset,
    now: Timestamp,
) -> Result<(), TokenError> {
    let total = match tx.stake(owner, quantity.code())? {
        Some(row) => row
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| out_of_range(quantity))?,
        None => quantity.clone(),
    };
    tx.put_stake(
        owner,
        StakeRow {
            quantity: total,
            updated_on: now,
        },
    );
    Ok(())
}
