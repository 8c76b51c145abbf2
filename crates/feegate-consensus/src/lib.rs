//! Fee requirement resolution and mempool admission.
//!
//! Builds on `feegate-types` (coins, decimal prices) and adds:
//! - Global fee parameters and their validation
//! - Required-fee derivation from gas prices and the global/local combiner
//! - Bypass rules for low-cost message types
//! - The admission decorator and a decorator chain for the host pipeline
//! - Node fee configuration loading

pub mod ante;
pub mod bypass;
pub mod config;
pub mod error;
pub mod params;
pub mod requirement;
pub mod source;
pub mod tx;

pub use ante::{evaluate, AnteChain, AnteContext, AnteDecorator, ExecMode, FeeDecorator, Next, Verdict};
pub use bypass::BypassConfig;
pub use config::{ConfigError, NodeFeeConfig};
pub use error::{AnteError, FeeError};
pub use params::{GlobalFeeParams, ParamsError, ParamsKeeper};
pub use source::{FeeParamSource, StakingConfig, StaticStakingConfig};
pub use tx::{FeeTx, Tx, TxView};
