//! Minimum-fee bypass for low-cost message types.
//!
//! Relayer traffic (IBC packets, client updates) keeps the chain connected
//! and is allowed through without fees, provided the transaction carries
//! nothing else and stays under a gas ceiling.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Default gas ceiling for bypass-eligible transactions.
pub const DEFAULT_MAX_TOTAL_BYPASS_GAS: u64 = 1_000_000;

/// Message types allowed to bypass the minimum fee by default.
pub const DEFAULT_BYPASS_MSG_TYPES: &[&str] = &[
    "/ibc.core.channel.v1.MsgRecvPacket",
    "/ibc.core.channel.v1.MsgAcknowledgement",
    "/ibc.core.client.v1.MsgCreateClient",
    "/ibc.core.client.v1.MsgUpdateClient",
    "/ibc.core.client.v1.MsgUpgradeClient",
    "/ibc.applications.transfer.v1.MsgTransfer",
    "/ibc.core.channel.v1.MsgTimeout",
    "/ibc.core.channel.v1.MsgTimeoutOnClose",
    "/ibc.core.channel.v1.MsgChannelOpenTry",
    "/ibc.core.channel.v1.MsgChannelOpenConfirm",
    "/ibc.core.channel.v1.MsgChannelOpenAck",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BypassConfig {
    /// Message type URLs allowed to bypass the minimum fee.
    pub msg_types: BTreeSet<String>,
    /// Gas limit ceiling shared by all bypass-eligible transactions.
    pub max_total_gas: u64,
}

impl Default for BypassConfig {
    fn default() -> Self {
        Self {
            msg_types: DEFAULT_BYPASS_MSG_TYPES.iter().map(|s| s.to_string()).collect(),
            max_total_gas: DEFAULT_MAX_TOTAL_BYPASS_GAS,
        }
    }
}

impl BypassConfig {
    pub fn new<I, S>(msg_types: I, max_total_gas: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            msg_types: msg_types.into_iter().map(Into::into).collect(),
            max_total_gas,
        }
    }

    /// No bypass at all.
    pub fn disabled() -> Self {
        Self {
            msg_types: BTreeSet::new(),
            max_total_gas: 0,
        }
    }

    /// True when every message type is on the allow-list. A transaction
    /// without messages passes vacuously.
    pub fn contains_only_bypass_msgs<S: AsRef<str>>(&self, msg_type_urls: &[S]) -> bool {
        msg_type_urls
            .iter()
            .all(|url| self.msg_types.contains(url.as_ref()))
    }

    /// Bypass eligibility: allow-listed messages only and `gas <= ceiling`.
    pub fn allows<S: AsRef<str>>(&self, msg_type_urls: &[S], gas: u64) -> bool {
        gas <= self.max_total_gas && self.contains_only_bypass_msgs(msg_type_urls)
    }
}
