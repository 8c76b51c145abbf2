//! Admission error types.

use feegate_types::Coins;
use thiserror::Error;

/// Rejections raised by the fee check. Each one is returned to the caller;
/// none is retried, since the outcome only changes with the parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    #[error("malformed transaction: {0}")]
    MalformedTransaction(String),

    #[error("cannot resolve staking bond denomination: {0}")]
    EmptyBaseDenomination(String),

    #[error("required fees are not set up")]
    UnconfiguredFeeRequirement,

    #[error("this fee denom is not accepted; got {got}, one is required: {required}")]
    UnacceptedFeeDenomination { got: Coins, required: Coins },

    #[error("no fees were specified; one fee must be provided: {required}")]
    NoFeeProvided { required: Coins },

    #[error("insufficient fees; only got: {got}. one is required: {required}")]
    InsufficientFee { got: Coins, required: Coins },
}

/// Error type of an [`AnteChain`](crate::ante::AnteChain) run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnteError {
    #[error(transparent)]
    Fee(#[from] FeeError),

    #[error("rejected by {stage}: {reason}")]
    Rejected { stage: String, reason: String },
}
