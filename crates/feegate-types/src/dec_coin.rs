//! Decimal coins and price vectors.
//!
//! A [`DecCoins`] is a per-denomination price per unit of gas. Governance
//! sets the global vector, node operators the local one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coin::split_amount_denom;
use crate::dec::Dec;
use crate::denom::validate_denom;
use crate::CoinError;

/// A decimal amount of a single denomination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecCoin {
    pub denom: String,
    pub amount: Dec,
}

impl DecCoin {
    pub fn new(denom: impl Into<String>, amount: Dec) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for DecCoin {
    type Err = CoinError;

    /// Parse `<decimal><denom>`, e.g. `0.0025uatom`.
    fn from_str(s: &str) -> Result<Self, CoinError> {
        let (amount, denom) = split_amount_denom(s)?;
        let amount: Dec = amount.parse()?;
        validate_denom(denom)?;
        Ok(Self::new(denom, amount))
    }
}

/// A price vector. Construction through [`DecCoins::new`] or parsing yields
/// a sorted, duplicate-free vector; values deserialized from a parameter
/// store are taken as-is and checked with [`DecCoins::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecCoins(Vec<DecCoin>);

impl DecCoins {
    /// Sort and validate. Zero prices are kept: they mark a denomination as
    /// accepted without a minimum.
    pub fn new(mut coins: Vec<DecCoin>) -> Result<Self, CoinError> {
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        let coins = Self(coins);
        coins.validate()?;
        Ok(coins)
    }

    /// Check that denominations are valid, unique, and strictly ascending.
    pub fn validate(&self) -> Result<(), CoinError> {
        let mut prev: Option<&str> = None;
        for coin in &self.0 {
            validate_denom(&coin.denom)?;
            if let Some(prev) = prev {
                if coin.denom == prev {
                    return Err(CoinError::DuplicateDenom(coin.denom.clone()));
                }
                if coin.denom.as_str() < prev {
                    return Err(CoinError::UnsortedDenom(coin.denom.clone()));
                }
            }
            prev = Some(coin.denom.as_str());
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when empty or every price is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| c.amount.is_zero())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecCoin> {
        self.0.iter()
    }
}

impl From<Vec<DecCoin>> for DecCoins {
    /// Wrap without sorting or validation.
    fn from(coins: Vec<DecCoin>) -> Self {
        Self(coins)
    }
}

impl<'a> IntoIterator for &'a DecCoins {
    type Item = &'a DecCoin;
    type IntoIter = std::slice::Iter<'a, DecCoin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DecCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", coin)?;
        }
        Ok(())
    }
}

impl FromStr for DecCoins {
    type Err = CoinError;

    /// Parse the node-config form `"0.0025uatom,1stake"`. An empty string
    /// is an empty vector.
    fn from_str(s: &str) -> Result<Self, CoinError> {
        let coins = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(DecCoin::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coins)
    }
}
