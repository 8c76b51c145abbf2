//! CLI command implementations.

use crate::{Cli, ModeArg};
use feegate_consensus::requirement;
use feegate_consensus::{AnteContext, GlobalFeeParams, NodeFeeConfig, TxView, Verdict};
use feegate_types::{Coins, DecCoins};
use log::debug;
use std::path::Path;

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Load the config file (or defaults) and apply command-line overrides.
fn load_config(cli: &Cli) -> std::result::Result<NodeFeeConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            debug!("loading fee config from {}", path.display());
            NodeFeeConfig::load(path)?
        }
        None => NodeFeeConfig::default(),
    };

    if let Some(prices) = &cli.global_prices {
        config.global_min_gas_prices = prices.parse()?;
    }
    if let Some(prices) = &cli.min_gas_prices {
        config.minimum_gas_prices = prices.parse()?;
    }
    if let Some(denom) = &cli.bond_denom {
        config.bond_denom = denom.clone();
    }
    if let Some(gas) = cli.max_bypass_gas {
        config.bypass.max_total_gas = gas;
    }
    Ok(config)
}

fn describe(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::NotEnforced => "accepted (fee floor not enforced in this mode)",
        Verdict::Bypass => "accepted (bypass messages under the gas ceiling)",
        Verdict::ZeroRatedDenom => "accepted (fee paid in a zero-rated denomination)",
        Verdict::ZeroRatedFloor => "accepted (zero-rated denomination, no fee required)",
        Verdict::Sufficient => "accepted (fee meets the requirement)",
    }
}

fn show(coins: &Coins) -> String {
    if coins.is_empty() {
        "(none)".to_string()
    } else {
        coins.to_string()
    }
}

// ─── Commands ───────────────────────────────────────────────────────────────

pub fn check(
    cli: &Cli,
    tx_path: Option<&Path>,
    fee: &str,
    gas: u64,
    msgs: &[String],
    mode: ModeArg,
    fee_pay_tx: bool,
) -> Result {
    let config = load_config(cli)?;
    let decorator = config.fee_decorator()?;

    let tx: TxView = match tx_path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => TxView::new(fee.parse()?, gas, msgs.iter().cloned()),
    };

    let ctx = AnteContext::new(mode.to_exec_mode()).with_fee_pay_tx(fee_pay_tx);
    debug!("checking tx fee [{}] gas {} in mode {}", tx.fee, tx.gas, mode);

    let verdict = decorator.check_fee(&ctx, &tx)?;
    println!("{}", describe(verdict));
    Ok(())
}

pub fn show_requirement(cli: &Cli, gas: u64) -> Result {
    let config = load_config(cli)?;
    let decorator = config.fee_decorator()?;

    let global = decorator.global_fee(gas)?;
    let local = requirement::required_fees(&config.minimum_gas_prices, gas);
    let combined = decorator.combined_requirement(gas)?;

    println!("Gas limit: {}", gas);
    println!("{:<10} {}", "Global", show(&global));
    println!("{:<10} {}", "Local", show(&local));
    println!("{:<10} {}", "Combined", show(&combined));
    Ok(())
}

pub fn required_fees(prices: &str, gas: u64) -> Result {
    let prices: DecCoins = prices.parse()?;
    println!("{}", show(&requirement::required_fees(&prices, gas)));
    Ok(())
}

pub fn validate_params(prices: &str) -> Result {
    let prices: DecCoins = prices.parse()?;
    GlobalFeeParams::new(prices.clone()).validate()?;
    println!("valid: {}", prices);
    Ok(())
}

pub fn show_config(cli: &Cli) -> Result {
    let config = load_config(cli)?;
    println!("{}", config.to_json()?);
    Ok(())
}
