//! Read-only transaction views used by the admission check.

use feegate_types::Coins;
use serde::{Deserialize, Serialize};

/// Fee-related accessors of a transaction.
pub trait FeeTx {
    /// Attached fee, sorted, with zero coins already removed.
    fn fee(&self) -> &Coins;

    fn gas(&self) -> u64;

    /// Type URLs of the messages, in transaction order.
    fn msg_type_urls(&self) -> &[String];
}

/// A transaction as handed over by the host pipeline.
pub trait Tx {
    /// Fee view of the transaction, `None` if it carries none.
    fn fee_tx(&self) -> Option<&dyn FeeTx>;
}

/// Plain transaction view, for hosts that decode transactions up front.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxView {
    #[serde(default)]
    pub fee: Coins,
    pub gas: u64,
    #[serde(default)]
    pub msgs: Vec<String>,
}

impl TxView {
    pub fn new<I, S>(fee: Coins, gas: u64, msgs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fee,
            gas,
            msgs: msgs.into_iter().map(Into::into).collect(),
        }
    }
}

impl FeeTx for TxView {
    fn fee(&self) -> &Coins {
        &self.fee
    }

    fn gas(&self) -> u64 {
        self.gas
    }

    fn msg_type_urls(&self) -> &[String] {
        &self.msgs
    }
}

impl Tx for TxView {
    fn fee_tx(&self) -> Option<&dyn FeeTx> {
        Some(self)
    }
}
