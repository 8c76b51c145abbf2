//! Mempool admission fee check.
//!
//! [`FeeDecorator`] checks that a transaction's fee is at least the combined
//! global and local requirement, and that it is paid in a denomination the
//! global policy accepts. The check only runs while admitting transactions
//! to the mempool; during block execution, simulation, or for transactions
//! whose fee is sponsored, the next stage is called directly.
//!
//! Transactions made of bypass message types whose gas limit stays under the
//! configured ceiling may omit the fee. If they carry one anyway, it must
//! still be in an accepted denomination.

use log::{debug, warn};

use crate::bypass::BypassConfig;
use crate::error::{AnteError, FeeError};
use crate::requirement::{
    combined_fee_requirement, global_required_fees, split_coins_by_denoms, split_zero_fees,
};
use crate::source::{FeeParamSource, StakingConfig};
use crate::tx::{FeeTx, Tx};
use feegate_types::Coins;

// =============================================================================
// Context
// =============================================================================

/// Execution mode the pipeline runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecMode {
    /// First admission of a transaction into the mempool.
    Check,
    /// Re-admission of pending transactions after a block commit.
    ReCheck,
    /// Dry run for gas estimation.
    Simulate,
    /// Execution of a transaction in a block.
    Finalize,
}

impl ExecMode {
    pub fn is_check_tx(&self) -> bool {
        matches!(self, ExecMode::Check | ExecMode::ReCheck)
    }
}

/// Per-call context handed to each pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnteContext {
    pub mode: ExecMode,
    /// Fee already covered by a sponsorship stage earlier in the pipeline.
    pub fee_pay_tx: bool,
}

impl AnteContext {
    pub fn new(mode: ExecMode) -> Self {
        Self {
            mode,
            fee_pay_tx: false,
        }
    }

    pub fn check_tx() -> Self {
        Self::new(ExecMode::Check)
    }

    pub fn with_fee_pay_tx(mut self, fee_pay_tx: bool) -> Self {
        self.fee_pay_tx = fee_pay_tx;
        self
    }

    /// The fee floor applies only to mempool admission of unsponsored
    /// transactions.
    pub fn enforces_fee_floor(&self) -> bool {
        self.mode.is_check_tx() && !self.fee_pay_tx
    }
}

// =============================================================================
// Verdict
// =============================================================================

/// Why a transaction was let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not in mempool admission, or the fee is sponsored.
    NotEnforced,
    /// Only bypass messages, under the gas ceiling.
    Bypass,
    /// Part of the fee is paid in a zero-rated denomination.
    ZeroRatedDenom,
    /// No fee attached and the requirement contains a zero-rated denomination.
    ZeroRatedFloor,
    /// One fee denomination meets its required amount.
    Sufficient,
}

// =============================================================================
// FeeDecorator
// =============================================================================

/// Pipeline stage enforcing the combined minimum fee.
#[derive(Debug, Clone)]
pub struct FeeDecorator<P, S> {
    bypass: BypassConfig,
    params: P,
    staking: S,
}

impl<P, S> FeeDecorator<P, S>
where
    P: FeeParamSource,
    S: StakingConfig,
{
    pub fn new(bypass: BypassConfig, params: P, staking: S) -> Self {
        Self {
            bypass,
            params,
            staking,
        }
    }

    pub fn bypass(&self) -> &BypassConfig {
        &self.bypass
    }

    /// Run the fee check, then hand over to `next` on success.
    pub fn ante_handle<T, E, F>(&self, ctx: &AnteContext, tx: &dyn Tx, next: F) -> Result<T, E>
    where
        F: FnOnce(&AnteContext, &dyn Tx) -> Result<T, E>,
        E: From<FeeError>,
    {
        self.check_fee(ctx, tx)?;
        next(ctx, tx)
    }

    /// Global required fees for a gas limit, sorted by denom. Zero in the
    /// bond denomination when no global price is configured.
    pub fn global_fee(&self, gas_limit: u64) -> Result<Coins, FeeError> {
        global_required_fees(self.params.global_min_gas_prices(), &self.staking, gas_limit)
    }

    /// Combined global and local requirement for a gas limit.
    pub fn combined_requirement(&self, gas_limit: u64) -> Result<Coins, FeeError> {
        let global = self.global_fee(gas_limit)?;
        let local = self.params.local_min_fees(gas_limit);
        Ok(combined_fee_requirement(&global, &local))
    }

    /// Decide whether the transaction's fee is acceptable.
    pub fn check_fee(&self, ctx: &AnteContext, tx: &dyn Tx) -> Result<Verdict, FeeError> {
        let fee_tx = tx.fee_tx().ok_or_else(|| {
            FeeError::MalformedTransaction("transaction carries no fee view".to_string())
        })?;

        if !ctx.enforces_fee_floor() {
            debug!("fee floor not enforced (mode {:?}, fee_pay_tx {})", ctx.mode, ctx.fee_pay_tx);
            return Ok(Verdict::NotEnforced);
        }

        let combined = self.combined_requirement(fee_tx.gas())?;
        evaluate(fee_tx, combined, &self.bypass)
    }
}

// =============================================================================
// Evaluator
// =============================================================================

/// Check an attached fee against a combined requirement.
///
/// The fee must only use denominations the requirement accepts. Unless the
/// transaction is bypass-eligible or pays partly in a zero-rated
/// denomination, at least one of its coins must meet the required amount
/// for that denomination.
pub fn evaluate(
    fee_tx: &dyn FeeTx,
    combined: Coins,
    bypass: &BypassConfig,
) -> Result<Verdict, FeeError> {
    if combined.is_empty() {
        warn!("combined fee requirement is empty, rejecting transaction");
        return Err(FeeError::UnconfiguredFeeRequirement);
    }

    let fee = fee_tx.fee();
    let gas = fee_tx.gas();

    let (non_zero_required, zero_denoms) = split_zero_fees(&combined);
    let (fee_non_zero, fee_zero) = split_coins_by_denoms(fee, &zero_denoms);

    // empty fee_non_zero is always a subset; a non-empty one never is when
    // every required denom is zero-rated
    if !fee_non_zero.denoms_subset_of(&non_zero_required) {
        debug!("fee [{}] not in accepted denoms [{}]", fee, combined);
        return Err(FeeError::UnacceptedFeeDenomination {
            got: fee.clone(),
            required: combined,
        });
    }

    if bypass.allows(fee_tx.msg_type_urls(), gas) {
        debug!("bypass messages only, gas {} <= {}", gas, bypass.max_total_gas);
        return Ok(Verdict::Bypass);
    }

    if !fee_zero.is_empty() {
        return Ok(Verdict::ZeroRatedDenom);
    }

    if fee.is_empty() && !zero_denoms.is_empty() {
        return Ok(Verdict::ZeroRatedFloor);
    }

    if !fee_non_zero.is_any_gte(&non_zero_required) {
        debug!("fee [{}] below requirement [{}]", fee, combined);
        if fee.is_empty() {
            return Err(FeeError::NoFeeProvided { required: combined });
        }
        return Err(FeeError::InsufficientFee {
            got: fee.clone(),
            required: combined,
        });
    }

    Ok(Verdict::Sufficient)
}

// =============================================================================
// Decorator chain
// =============================================================================

/// One stage of the admission pipeline.
pub trait AnteDecorator {
    fn ante_handle(&self, ctx: &AnteContext, tx: &dyn Tx, next: Next<'_>) -> Result<(), AnteError>;
}

/// Continuation over the remaining stages of an [`AnteChain`].
pub struct Next<'a> {
    rest: &'a [Box<dyn AnteDecorator + Send + Sync>],
}

impl Next<'_> {
    pub fn run(self, ctx: &AnteContext, tx: &dyn Tx) -> Result<(), AnteError> {
        match self.rest.split_first() {
            Some((stage, rest)) => stage.ante_handle(ctx, tx, Next { rest }),
            None => Ok(()),
        }
    }
}

impl<P, S> AnteDecorator for FeeDecorator<P, S>
where
    P: FeeParamSource,
    S: StakingConfig,
{
    fn ante_handle(&self, ctx: &AnteContext, tx: &dyn Tx, next: Next<'_>) -> Result<(), AnteError> {
        FeeDecorator::ante_handle(self, ctx, tx, |ctx, tx| next.run(ctx, tx))
    }
}

/// Ordered list of stages; each stage decides whether to call the next.
#[derive(Default)]
pub struct AnteChain {
    stages: Vec<Box<dyn AnteDecorator + Send + Sync>>,
}

impl AnteChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<D>(mut self, stage: D) -> Self
    where
        D: AnteDecorator + Send + Sync + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn run(&self, ctx: &AnteContext, tx: &dyn Tx) -> Result<(), AnteError> {
        Next { rest: &self.stages }.run(ctx, tx)
    }
}
