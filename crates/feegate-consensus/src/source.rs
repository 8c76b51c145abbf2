//! Read-only collaborators consulted during admission.

use std::sync::Arc;

use feegate_types::{Coins, DecCoins};

use crate::requirement::required_fees;

/// Source of the global and node-local minimum gas prices.
pub trait FeeParamSource {
    /// Governance minimum gas prices. May be empty.
    fn global_min_gas_prices(&self) -> DecCoins;

    /// This node's operator-configured minimum gas prices.
    fn local_min_gas_prices(&self) -> DecCoins;

    /// Local minimum fees for `gas_limit`. All-zero or empty local prices
    /// yield an empty vector rather than zero coins.
    fn local_min_fees(&self, gas_limit: u64) -> Coins {
        let prices = self.local_min_gas_prices();
        if prices.is_zero() {
            return Coins::default();
        }
        required_fees(&prices, gas_limit)
    }
}

/// Staking configuration, consulted for the chain's bond denomination.
pub trait StakingConfig {
    fn bond_denom(&self) -> Result<String, String>;
}

impl<T: FeeParamSource + ?Sized> FeeParamSource for Arc<T> {
    fn global_min_gas_prices(&self) -> DecCoins {
        (**self).global_min_gas_prices()
    }

    fn local_min_gas_prices(&self) -> DecCoins {
        (**self).local_min_gas_prices()
    }

    fn local_min_fees(&self, gas_limit: u64) -> Coins {
        (**self).local_min_fees(gas_limit)
    }
}

impl<T: StakingConfig + ?Sized> StakingConfig for Arc<T> {
    fn bond_denom(&self) -> Result<String, String> {
        (**self).bond_denom()
    }
}

/// Fixed bond denomination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticStakingConfig {
    pub bond_denom: String,
}

impl StaticStakingConfig {
    pub fn new(bond_denom: impl Into<String>) -> Self {
        Self {
            bond_denom: bond_denom.into(),
        }
    }
}

impl StakingConfig for StaticStakingConfig {
    fn bond_denom(&self) -> Result<String, String> {
        Ok(self.bond_denom.clone())
    }
}
