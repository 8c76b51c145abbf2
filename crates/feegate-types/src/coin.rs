//! Integer coins and sorted coin vectors (fee vectors).

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::denom::validate_denom;
use crate::CoinError;

// =============================================================================
// Coin
// =============================================================================

/// A non-negative integer amount of a single denomination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "amount_serde")]
    pub amount: BigUint,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<BigUint>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinError;

    /// Parse `<amount><denom>`, e.g. `1500uatom`.
    fn from_str(s: &str) -> Result<Self, CoinError> {
        let (amount, denom) = split_amount_denom(s)?;
        let amount = BigUint::parse_bytes(amount.as_bytes(), 10)
            .filter(|_| amount.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| CoinError::InvalidAmount(amount.to_string()))?;
        validate_denom(denom)?;
        Ok(Self::new(denom, amount))
    }
}

/// Split a coin expression at the first byte that cannot belong to a number.
pub(crate) fn split_amount_denom(s: &str) -> Result<(&str, &str), CoinError> {
    let s = s.trim();
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .ok_or_else(|| CoinError::InvalidCoin(s.to_string()))?;
    let (amount, denom) = s.split_at(split);
    if amount.is_empty() {
        return Err(CoinError::InvalidCoin(s.to_string()));
    }
    Ok((amount, denom.trim_start()))
}

/// Decimal-string serialization for big integer amounts.
mod amount_serde {
    use num_bigint::BigUint;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(amount: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(serde::de::Error::custom(format!("invalid amount: {s}")));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {s}")))
    }
}

// =============================================================================
// Coins
// =============================================================================

/// Coins sorted by ascending denomination with no duplicate denominations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Sanitize a user-supplied vector: validate denominations, drop
    /// zero-amount coins, sort, and reject duplicates.
    pub fn new(coins: Vec<Coin>) -> Result<Self, CoinError> {
        let mut coins: Vec<Coin> = coins
            .into_iter()
            .map(|c| validate_denom(&c.denom).map(|_| c))
            .filter(|c| !matches!(c, Ok(c) if c.is_zero()))
            .collect::<Result<_, _>>()?;
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));

        if let Some(dup) = coins.windows(2).find(|w| w[0].denom == w[1].denom) {
            return Err(CoinError::DuplicateDenom(dup[0].denom.clone()));
        }
        Ok(Self(coins))
    }

    /// Sort without dropping zero-amount coins.
    ///
    /// Requirement vectors use zero amounts to mark zero-rated denominations,
    /// so they must survive. Callers guarantee denominations are unique.
    pub fn sorted(mut coins: Vec<Coin>) -> Self {
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        Self(coins)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    pub fn denoms(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|c| c.denom.as_str())
    }

    pub fn get(&self, denom: &str) -> Option<&Coin> {
        self.0
            .binary_search_by(|c| c.denom.as_str().cmp(denom))
            .ok()
            .map(|i| &self.0[i])
    }

    /// Amount held in `denom`, zero when absent.
    pub fn amount_of(&self, denom: &str) -> BigUint {
        self.get(denom).map(|c| c.amount.clone()).unwrap_or_default()
    }

    /// True when the vector is empty or carries at least one zero coin.
    pub fn contains_zero_coins(&self) -> bool {
        self.is_empty() || self.0.iter().any(Coin::is_zero)
    }

    /// Every denomination of `self` is held by `other` with a non-zero
    /// amount. An empty vector is a subset of anything.
    pub fn denoms_subset_of(&self, other: &Coins) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.0.iter().all(|c| !other.amount_of(&c.denom).is_zero())
    }

    /// At least one coin of `self` meets or exceeds the non-zero amount
    /// `other` requires for the same denomination. Amounts are compared per
    /// denomination and never summed across denominations.
    pub fn is_any_gte(&self, other: &Coins) -> bool {
        if other.is_empty() {
            return false;
        }
        self.0.iter().any(|c| {
            let required = other.amount_of(&c.denom);
            !required.is_zero() && c.amount >= required
        })
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = CoinError;

    fn try_from(coins: Vec<Coin>) -> Result<Self, CoinError> {
        Self::new(coins)
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Coins {
    type Item = Coin;
    type IntoIter = std::vec::IntoIter<Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Coins {
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

impl FromStr for Coins {
    type Err = CoinError;

    /// Parse `"1uatom,20stake"`. An empty string is an empty vector.
    fn from_str(s: &str) -> Result<Self, CoinError> {
        let coins = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Coin::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(s: &str) -> Coins {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_sorts_and_drops_zero() {
        let c = Coins::new(vec![
            Coin::new("stake", 2u32),
            Coin::new("photon", 0u32),
            Coin::new("atom", 1u32),
        ])
        .unwrap();
        assert_eq!(c.to_string(), "1atom,2stake");
    }

    #[test]
    fn test_new_rejects_duplicates_and_bad_denoms() {
        let dup = Coins::new(vec![Coin::new("atom", 1u32), Coin::new("atom", 2u32)]);
        assert_eq!(dup, Err(CoinError::DuplicateDenom("atom".into())));

        let bad = Coins::new(vec![Coin::new("a!", 1u32)]);
        assert!(matches!(bad, Err(CoinError::InvalidDenom(_))));
    }

    #[test]
    fn test_sorted_keeps_zero_coins() {
        let c = Coins::sorted(vec![Coin::new("stake", 0u32), Coin::new("photon", 1u32)]);
        assert_eq!(c.to_string(), "1photon,0stake");
        assert!(c.contains_zero_coins());
    }

    #[test]
    fn test_contains_zero_coins() {
        assert!(Coins::default().contains_zero_coins());
        assert!(!coins("1photon,2stake").contains_zero_coins());
        let mixed = Coins::sorted(vec![Coin::new("photon", 0u32), Coin::new("quark", 3u32)]);
        assert!(mixed.contains_zero_coins());
    }

    #[test]
    fn test_amount_of() {
        let c = coins("1atom,20stake");
        assert_eq!(c.amount_of("stake"), BigUint::from(20u32));
        assert_eq!(c.amount_of("quark"), BigUint::from(0u32));
    }

    #[test]
    fn test_denoms_subset_of() {
        let req = coins("1atom,2stake");
        assert!(Coins::default().denoms_subset_of(&req));
        assert!(Coins::default().denoms_subset_of(&Coins::default()));
        assert!(coins("5atom").denoms_subset_of(&req));
        assert!(coins("1atom,1stake").denoms_subset_of(&req));
        assert!(!coins("5quark").denoms_subset_of(&req));
        assert!(!coins("5atom").denoms_subset_of(&Coins::default()));
        assert!(!coins("1atom,1quark,1stake").denoms_subset_of(&req));

        // zero amounts in `other` do not count as held
        let zero_rated = Coins::sorted(vec![Coin::new("atom", 0u32)]);
        assert!(!coins("1atom").denoms_subset_of(&zero_rated));
    }

    #[test]
    fn test_is_any_gte() {
        let req = coins("10atom,2stake");
        assert!(coins("5atom,2stake").is_any_gte(&req));
        assert!(coins("10atom").is_any_gte(&req));
        assert!(!coins("9atom,1stake").is_any_gte(&req));
        assert!(!Coins::default().is_any_gte(&req));
        assert!(!coins("100atom").is_any_gte(&Coins::default()));
        // not summed across denominations
        assert!(!coins("9atom,1stake").is_any_gte(&coins("10atom,10stake")));
    }

    #[test]
    fn test_parse() {
        assert!(coins("").is_empty());
        assert_eq!(coins(" 20stake , 1atom").to_string(), "1atom,20stake");
        assert!("1.5atom".parse::<Coins>().is_err());
        assert!("atom".parse::<Coins>().is_err());
        assert!("10".parse::<Coins>().is_err());
    }

    #[test]
    fn test_serde_amount_as_string() {
        let c = coins("1000000000000000000000uatom");
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"[{"denom":"uatom","amount":"1000000000000000000000"}]"#);

        let back: Coins = serde_json::from_str(
            r#"[{"denom":"stake","amount":"2"},{"denom":"atom","amount":"0"}]"#,
        )
        .unwrap();
        assert_eq!(back, coins("2stake"));

        let dup = serde_json::from_str::<Coins>(
            r#"[{"denom":"atom","amount":"1"},{"denom":"atom","amount":"2"}]"#,
        );
        assert!(dup.is_err());
    }
}
