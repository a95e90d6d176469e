//! Fixed-point, symbol-tagged token amounts.
//!
//! An [`Asset`] is a scaled integer (`value × 10^precision`) tagged with its
//! [`Symbol`]. There is no floating point anywhere: amounts parse from and
//! render to the textual form `"10000.0000 SEED"` exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;
use crate::symbol::{Symbol, SymbolCode};

/// A quantity of one currency.
///
/// Arithmetic is only defined between assets of the same symbol; every
/// operation is checked and returns `None` on symbol mismatch or overflow.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    /// Largest magnitude a valid amount may have (`2^62 - 1`).
    pub const MAX_AMOUNT: i64 = (1 << 62) - 1;

    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    pub fn zero(symbol: Symbol) -> Self {
        Self { amount: 0, symbol }
    }

    /// Raw scaled amount.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn code(&self) -> &SymbolCode {
        self.symbol.code()
    }

    /// Whether the amount lies within `[-MAX_AMOUNT, MAX_AMOUNT]`.
    pub fn is_valid(&self) -> bool {
        (-Self::MAX_AMOUNT..=Self::MAX_AMOUNT).contains(&self.amount)
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn checked_add(&self, other: &Asset) -> Option<Asset> {
        if self.symbol != other.symbol {
            return None;
        }
        let sum = Asset::new(self.amount.checked_add(other.amount)?, self.symbol.clone());
        sum.is_valid().then_some(sum)
    }

    pub fn checked_sub(&self, other: &Asset) -> Option<Asset> {
        if self.symbol != other.symbol {
            return None;
        }
        let diff = Asset::new(self.amount.checked_sub(other.amount)?, self.symbol.clone());
        diff.is_valid().then_some(diff)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let unit = self.symbol.unit() as u64;
        let magnitude = self.amount.unsigned_abs();
        let whole = magnitude / unit;
        let fraction = magnitude % unit;
        let code = self.symbol.code();
        match self.symbol.precision() {
            0 => write!(f, "{sign}{whole} {code}"),
            precision => write!(
                f,
                "{sign}{whole}.{fraction:0width$} {code}",
                width = precision as usize
            ),
        }
    }
}

impl FromStr for Asset {
    type Err = TypesError;

    /// Parses `"<digits>[.<digits>] <CODE>"`. The number of fractional
    /// digits becomes the symbol precision.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidAsset(s.to_string());
        let out_of_range = || TypesError::AmountOutOfRange(s.to_string());

        let (number, code) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let code = SymbolCode::new(code.trim()).map_err(|_| invalid())?;

        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (whole, fraction) = match digits.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        let precision = u8::try_from(fraction.len()).map_err(|_| invalid())?;
        let symbol = Symbol::new(precision, code).map_err(|_| invalid())?;

        let whole: i64 = whole.parse().map_err(|_| out_of_range())?;
        let fraction: i64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse().map_err(|_| out_of_range())?
        };
        let magnitude = whole
            .checked_mul(symbol.unit())
            .and_then(|scaled| scaled.checked_add(fraction))
            .ok_or_else(out_of_range)?;

        let asset = Asset::new(if negative { -magnitude } else { magnitude }, symbol);
        if !asset.is_valid() {
            return Err(out_of_range());
        }
        Ok(asset)
    }
}

impl TryFrom<String> for Asset {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}
