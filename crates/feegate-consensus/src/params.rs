//! Global fee parameters and the in-memory parameter store.

use std::sync::RwLock;

use feegate_types::{CoinError, DecCoins};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::FeeParamSource;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("invalid minimum gas prices: {0}")]
    Invalid(#[from] CoinError),
}

/// Governance-controlled fee parameters.
///
/// An empty `minimum_gas_prices` means no global floor is configured; the
/// admission check then falls back to a zero fee in the bond denomination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalFeeParams {
    pub minimum_gas_prices: DecCoins,
}

impl GlobalFeeParams {
    pub fn new(minimum_gas_prices: DecCoins) -> Self {
        Self { minimum_gas_prices }
    }

    /// Prices must be sorted by denom, unique, and carry valid denoms.
    pub fn validate(&self) -> Result<(), ParamsError> {
        self.minimum_gas_prices.validate()?;
        Ok(())
    }
}

/// Parameter store holding the global parameters and this node's local
/// minimum gas prices.
///
/// Reads return the current value on every call; nothing is cached on the
/// admission side, so a parameter update applies to the next transaction.
#[derive(Debug, Default)]
pub struct ParamsKeeper {
    params: RwLock<GlobalFeeParams>,
    local_min_gas_prices: DecCoins,
}

impl ParamsKeeper {
    pub fn new(local_min_gas_prices: DecCoins) -> Self {
        Self {
            params: RwLock::new(GlobalFeeParams::default()),
            local_min_gas_prices,
        }
    }

    pub fn params(&self) -> GlobalFeeParams {
        self.params
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the global parameters. Invalid vectors are rejected and leave
    /// the stored value untouched.
    pub fn set_params(&self, params: GlobalFeeParams) -> Result<(), ParamsError> {
        params.validate()?;
        debug!("global minimum gas prices set to [{}]", params.minimum_gas_prices);
        *self
            .params
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = params;
        Ok(())
    }
}

impl FeeParamSource for ParamsKeeper {
    fn global_min_gas_prices(&self) -> DecCoins {
        self.params().minimum_gas_prices
    }

    fn local_min_gas_prices(&self) -> DecCoins {
        self.local_min_gas_prices.clone()
    }
}
