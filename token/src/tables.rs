//! Read-side queries.
//!
//! Tables are addressed the way a host exposes them: by name and scope.
//! `stat` is scoped by symbol code; `accounts`, `stake` and `refund` are
//! scoped by owner account.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use seed_store::{BalanceRow, CurrencyStats, RefundRow, StakeRow, TokenStore};
use seed_types::{AccountName, Asset, SymbolCode};

use crate::engine::TokenEngine;
use crate::TokenError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Stat,
    Accounts,
    Stake,
    Refund,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stat => "stat",
            Self::Accounts => "accounts",
            Self::Stake => "stake",
            Self::Refund => "refund",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stat" => Ok(Self::Stat),
            "accounts" => Ok(Self::Accounts),
            "stake" => Ok(Self::Stake),
            "refund" => Ok(Self::Refund),
            other => Err(TokenError::InvalidQuery(format!("unknown table {other:?}"))),
        }
    }
}

/// Rows of one table within one scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TableRows {
    Stat(Vec<CurrencyStats>),
    Accounts(Vec<BalanceRow>),
    Stake(Vec<StakeRow>),
    Refund(Vec<RefundRow>),
}

impl TableRows {
    pub fn len(&self) -> usize {
        match self {
            Self::Stat(rows) => rows.len(),
            Self::Accounts(rows) => rows.len(),
            Self::Stake(rows) => rows.len(),
            Self::Refund(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: TokenStore> TokenEngine<S> {
    pub fn query_table(&self, table: Table, scope: &str) -> Result<TableRows, TokenError> {
        let rows = match table {
            Table::Stat => {
                let code = SymbolCode::new(scope)
                    .map_err(|e| TokenError::InvalidQuery(e.to_string()))?;
                TableRows::Stat(self.store.get_stat(&code)?.into_iter().collect())
            }
            Table::Accounts => TableRows::Accounts(self.store.balances_of(&owner_scope(scope)?)?),
            Table::Stake => TableRows::Stake(self.store.stakes_of(&owner_scope(scope)?)?),
            Table::Refund => TableRows::Refund(self.store.refunds_of(&owner_scope(scope)?)?),
        };
        Ok(rows)
    }

    /// Circulating supply, or `None` for an unregistered symbol.
    pub fn get_supply(&self, code: &SymbolCode) -> Result<Option<Asset>, TokenError> {
        Ok(self.store.get_stat(code)?.map(|stat| stat.supply))
    }

    /// Liquid balance; `None` when the owner holds no row.
    pub fn get_balance(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<Asset>, TokenError> {
        Ok(self.store.get_balance(owner, code)?.map(|row| row.balance))
    }

    pub fn get_stake(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<Asset>, TokenError> {
        Ok(self.store.get_stake(owner, code)?.map(|row| row.quantity))
    }

    pub fn get_refund(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<RefundRow>, TokenError> {
        Ok(self.store.get_refund(owner, code)?)
    }
}

fn owner_scope(scope: &str) -> Result<AccountName, TokenError> {
    AccountName::new(scope).map_err(|e| TokenError::InvalidQuery(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::*;
    use crate::Action;

    #[test]
    fn test_table_names_parse() {
        assert_eq!("accounts".parse::<Table>().unwrap(), Table::Accounts);
        assert_eq!(Table::Refund.to_string(), "refund");
        assert_eq!("balances".parse::<Table>().unwrap_err().kind(), "InvalidQuery");
    }

    #[test]
    fn test_query_rows_by_scope() {
        let engine = engine();
        issue(&engine, "user1", "10.0000 SEED");
        let stake = Action::Stake { owner: name("user1"), quantity: seed("4.0000 SEED") };
        try_apply(&engine, stake, "user1", 0).unwrap();

        let stat = engine.query_table(Table::Stat, "SEED").unwrap();
        assert_eq!(stat.len(), 1);
        let balances = engine.query_table(Table::Accounts, "user1").unwrap();
        assert_eq!(
            balances,
            TableRows::Accounts(vec![BalanceRow { balance: seed("6.0000 SEED"), claimed: true }])
        );
        assert_eq!(engine.query_table(Table::Stake, "user1").unwrap().len(), 1);
        assert!(engine.query_table(Table::Refund, "user1").unwrap().is_empty());
        assert!(engine.query_table(Table::Accounts, "user2").unwrap().is_empty());
    }

    #[test]
    fn test_query_rows_serialize_as_text_amounts() {
        let engine = engine();
        let json = serde_json::to_value(engine.query_table(Table::Stat, "SEED").unwrap()).unwrap();
        assert_eq!(json[0]["supply"], "0.0000 SEED");
        assert_eq!(json[0]["max_supply"], MAX);
        assert_eq!(json[0]["issuer"], "parslseed123");
    }

    #[test]
    fn test_malformed_scope() {
        let engine = engine();
        assert_eq!(engine.query_table(Table::Stat, "seed").unwrap_err().kind(), "InvalidQuery");
        assert_eq!(engine.query_table(Table::Stake, "User1").unwrap_err().kind(), "InvalidQuery");
    }
}
