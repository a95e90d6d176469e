//! Currency registry transitions: `create`, `update`, `issue`, and the
//! minting step shared with `rewarddrop`.

use seed_store::{CurrencyStats, TokenStore};
use seed_types::{AccountName, Asset};

use crate::engine::{out_of_range, TokenEngine};
use crate::ledger::credit_balance;
use crate::staging::Staged;
use crate::TokenError;

impl<S: TokenStore> TokenEngine<S> {
    pub(crate) fn create(
        &self,
        tx: &mut Staged<'_, S>,
        existing: Option<CurrencyStats>,
        issuer: &AccountName,
        maximum_supply: &Asset,
    ) -> Result<(), TokenError> {
        if existing.is_some() {
            return Err(TokenError::AlreadyExists(maximum_supply.code().clone()));
        }
        tx.put_stat(CurrencyStats {
            supply: Asset::zero(maximum_supply.symbol().clone()),
            max_supply: maximum_supply.clone(),
            issuer: issuer.clone(),
        });
        tracing::info!(%issuer, max_supply = %maximum_supply, "currency created");
        Ok(())
    }

    pub(crate) fn update(
        &self,
        tx: &mut Staged<'_, S>,
        mut stat: CurrencyStats,
        issuer: &AccountName,
        maximum_supply: &Asset,
    ) -> Result<(), TokenError> {
        if maximum_supply.amount() < stat.supply.amount() {
            return Err(TokenError::MaxSupplyBelowSupply {
                requested: maximum_supply.clone(),
                supply: stat.supply,
            });
        }
        stat.max_supply = maximum_supply.clone();
        stat.issuer = issuer.clone();
        tx.put_stat(stat);
        tracing::info!(%issuer, max_supply = %maximum_supply, "currency updated");
        Ok(())
    }

    pub(crate) fn issue(
        &self,
        tx: &mut Staged<'_, S>,
        stat: CurrencyStats,
        to: &AccountName,
        quantity: &Asset,
    ) -> Result<(), TokenError> {
        let stat = mint(tx, stat, quantity)?;
        // Issuer credits stay unclaimed until the recipient acts on them.
        credit_balance(tx, to, quantity, to == &stat.issuer)?;
        tracing::debug!(%to, %quantity, supply = %stat.supply, "issued");
        Ok(())
    }
}

/// Raise circulating supply by `quantity`, bounded by the maximum supply.
pub(crate) fn mint<S: TokenStore>(
    tx: &mut Staged<'_, S>,
    mut stat: CurrencyStats,
    quantity: &Asset,
) -> Result<CurrencyStats, TokenError> {
    let headroom = stat.headroom();
    if quantity.amount() > headroom {
        return Err(TokenError::SupplyExceeded {
            quantity: quantity.clone(),
            available: Asset::new(headroom, stat.supply.symbol().clone()),
        });
    }
    stat.supply = stat
        .supply
        .checked_add(quantity)
        .ok_or_else(|| out_of_range(quantity))?;
    tx.put_stat(stat.clone());
    Ok(stat)
}
