//! Arbitrary-precision non-negative fixed-point decimal.
//!
//! Gas prices are fractional (`0.0025uatom` per gas unit) while fees are
//! whole atomic units, so prices are held as a big integer scaled by
//! `10^PRECISION`. Negative values cannot be represented.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::CoinError;

/// Number of fractional decimal digits carried by [`Dec`].
pub const PRECISION: u32 = 18;

fn precision_multiplier() -> BigUint {
    BigUint::from(10u32).pow(PRECISION)
}

/// Non-negative decimal with 18 digits of fractional precision.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec {
    atomics: BigUint,
}

impl Dec {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Whole-number decimal.
    pub fn from_int(value: u64) -> Self {
        Self {
            atomics: BigUint::from(value) * precision_multiplier(),
        }
    }

    /// Build from raw atomics, i.e. `value * 10^-18`.
    pub fn from_atomics(atomics: BigUint) -> Self {
        Self { atomics }
    }

    pub fn atomics(&self) -> &BigUint {
        &self.atomics
    }

    pub fn is_zero(&self) -> bool {
        self.atomics.is_zero()
    }

    /// Exact product with an integer; no precision is lost.
    pub fn mul_int(&self, n: u64) -> Self {
        Self {
            atomics: &self.atomics * BigUint::from(n),
        }
    }

    /// Smallest integer greater than or equal to this value.
    pub fn ceil(&self) -> BigUint {
        Integer::div_ceil(&self.atomics, &precision_multiplier())
    }
}

impl FromStr for Dec {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, CoinError> {
        let invalid = || CoinError::InvalidDecimal(s.to_string());

        let (int_part, frac_part) = match s.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.is_empty() {
                    return Err(invalid());
                }
                (int_part, frac_part)
            }
            None => (s, ""),
        };

        if int_part.is_empty()
            || !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac_part.len() > PRECISION as usize {
            return Err(CoinError::TooManyDecimals(s.to_string()));
        }

        let mut digits = String::with_capacity(int_part.len() + PRECISION as usize);
        digits.push_str(int_part);
        digits.push_str(frac_part);
        digits.extend(std::iter::repeat('0').take(PRECISION as usize - frac_part.len()));

        let atomics = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        Ok(Self { atomics })
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.atomics.to_string();
        let precision = PRECISION as usize;
        let padded = if digits.len() <= precision {
            format!("{}{}", "0".repeat(precision + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - precision);
        write!(f, "{}.{}", int_part, frac_part)
    }
}

impl Serialize for Dec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(dec("1").to_string(), "1.000000000000000000");
        assert_eq!(dec("0.0025").to_string(), "0.002500000000000000");
        assert_eq!(dec("12.5").to_string(), "12.500000000000000000");
        assert_eq!(dec("0.000000000000000001").to_string(), "0.000000000000000001");
        assert_eq!(dec("0"), Dec::zero());
        assert_eq!(dec("3"), Dec::from_int(3));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for s in ["", ".5", "1.", "-1", "1.2.3", "abc", "1e5", " 1"] {
            assert!(matches!(s.parse::<Dec>(), Err(CoinError::InvalidDecimal(_))), "{s:?}");
        }
        assert!(matches!(
            "0.0000000000000000001".parse::<Dec>(),
            Err(CoinError::TooManyDecimals(_))
        ));
    }

    #[test]
    fn test_ceil() {
        assert_eq!(dec("0").ceil(), BigUint::from(0u32));
        assert_eq!(dec("1").ceil(), BigUint::from(1u32));
        assert_eq!(dec("1.000000000000000001").ceil(), BigUint::from(2u32));
        assert_eq!(dec("0.1").ceil(), BigUint::from(1u32));
    }

    #[test]
    fn test_mul_int_then_ceil_rounds_up() {
        // 0.0025 * 200_000 = 500 exactly
        assert_eq!(dec("0.0025").mul_int(200_000).ceil(), BigUint::from(500u32));
        // 0.0025 * 1 = 0.0025 -> 1
        assert_eq!(dec("0.0025").mul_int(1).ceil(), BigUint::from(1u32));
        // 0.333 * 3 = 0.999 -> 1
        assert_eq!(dec("0.333").mul_int(3).ceil(), BigUint::from(1u32));
        assert_eq!(dec("5").mul_int(0).ceil(), BigUint::from(0u32));
    }

    #[test]
    fn test_mul_int_large_gas() {
        let fee = dec("1.5").mul_int(u64::MAX).ceil();
        let expected = BigUint::from(u64::MAX) * 3u32;
        assert_eq!(fee, (expected + 1u32) / 2u32);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&dec("0.25")).unwrap();
        assert_eq!(json, "\"0.250000000000000000\"");
        let back: Dec = serde_json::from_str("\"0.25\"").unwrap();
        assert_eq!(back, dec("0.25"));
        assert!(serde_json::from_str::<Dec>("\"-1\"").is_err());
    }
}
