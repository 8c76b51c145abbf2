//! Node fee configuration.
//!
//! Operators describe a node's fee policy in one JSON document. Price
//! vectors use the same string form as node config files
//! (`"0.0025uatom,1stake"`).
//!
//! ```json
//! {
//!   "global_min_gas_prices": "0.0025uatom",
//!   "minimum_gas_prices": "0.005uatom",
//!   "bond_denom": "uatom",
//!   "bypass": { "max_total_gas": 1000000 }
//! }
//! ```

use std::path::Path;

use feegate_types::DecCoins;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ante::FeeDecorator;
use crate::bypass::BypassConfig;
use crate::params::{GlobalFeeParams, ParamsError, ParamsKeeper};
use crate::source::StaticStakingConfig;

/// Bond denomination used when the configuration names none.
pub const DEFAULT_BOND_DENOM: &str = "stake";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Params(#[from] ParamsError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeFeeConfig {
    /// Governance minimum gas prices (empty: no global floor).
    #[serde(with = "dec_coins_string")]
    pub global_min_gas_prices: DecCoins,
    /// This node's minimum gas prices.
    #[serde(with = "dec_coins_string")]
    pub minimum_gas_prices: DecCoins,
    pub bond_denom: String,
    pub bypass: BypassConfig,
}

impl Default for NodeFeeConfig {
    fn default() -> Self {
        Self {
            global_min_gas_prices: DecCoins::default(),
            minimum_gas_prices: DecCoins::default(),
            bond_denom: DEFAULT_BOND_DENOM.to_string(),
            bypass: BypassConfig::default(),
        }
    }
}

impl NodeFeeConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the parameter store, storing the global prices through the
    /// validating setter.
    pub fn params_keeper(&self) -> Result<ParamsKeeper, ConfigError> {
        let keeper = ParamsKeeper::new(self.minimum_gas_prices.clone());
        keeper.set_params(GlobalFeeParams::new(self.global_min_gas_prices.clone()))?;
        Ok(keeper)
    }

    pub fn fee_decorator(&self) -> Result<FeeDecorator<ParamsKeeper, StaticStakingConfig>, ConfigError> {
        Ok(FeeDecorator::new(
            self.bypass.clone(),
            self.params_keeper()?,
            StaticStakingConfig::new(self.bond_denom.clone()),
        ))
    }
}

/// Price vectors as `"0.0025uatom,1stake"` strings.
mod dec_coins_string {
    use feegate_types::DecCoins;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(coins: &DecCoins, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(coins)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DecCoins, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
