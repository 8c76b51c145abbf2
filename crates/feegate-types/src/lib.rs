//! Value types for fee requirement resolution.
//!
//! This crate provides the arithmetic and set algebra the admission engine
//! works on: denomination validation, an arbitrary-precision fixed-point
//! decimal for gas prices, integer coin vectors for fees, and decimal coin
//! vectors for minimum gas price policies.

pub mod coin;
pub mod dec;
pub mod dec_coin;
pub mod denom;

pub use coin::{Coin, Coins};
pub use dec::Dec;
pub use dec_coin::{DecCoin, DecCoins};
pub use denom::validate_denom;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoinError {
    #[error("invalid denom: {0}")]
    InvalidDenom(String),

    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),

    #[error("too many decimal places in {0} (max {max})", max = dec::PRECISION)]
    TooManyDecimals(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid coin expression: {0}")]
    InvalidCoin(String),

    #[error("duplicate denomination {0}")]
    DuplicateDenom(String),

    #[error("denomination {0} is not sorted")]
    UnsortedDenom(String),
}
