//! Named Tendermint RPC methods exposed by every chain node.

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// A Tendermint RPC method and the node path serving it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RpcMethod {
    /// Node heartbeat
    Health,
    /// Node status
    Status,
    NetInfo,
    /// Block headers between `minHeight` and `maxHeight` (max 20)
    Blockchain,
    /// Block at `height`, or the latest block
    Block,
    BlockByHash,
    BlockResults,
    Commit,
    Validators,
    Genesis,
    DumpConsensusState,
    ConsensusState,
    ConsensusParams,
    /// Up to `limit` unconfirmed transactions (default 30, max 100)
    UnconfirmedTxs,
    NumUnconfirmedTxs,
    TxSearch,
    BlockSearch,
    /// Transaction by `hash`, with a proof when `prove` is true
    Tx,
    BroadcastEvidence,
    /// Returns the CheckTx response without waiting for DeliverTx
    BroadcastTxSync,
    /// Returns immediately without waiting for CheckTx
    BroadcastTxAsync,
    /// Waits for both CheckTx and DeliverTx
    BroadcastTxCommit,
    CheckTx,
    AbciInfo,
    AbciQuery,
}

impl RpcMethod {
    /// Every method, in the order nodes document them
    pub const ALL: [RpcMethod; 25] = [
        Self::Health,
        Self::Status,
        Self::NetInfo,
        Self::Blockchain,
        Self::Block,
        Self::BlockByHash,
        Self::BlockResults,
        Self::Commit,
        Self::Validators,
        Self::Genesis,
        Self::DumpConsensusState,
        Self::ConsensusState,
        Self::ConsensusParams,
        Self::UnconfirmedTxs,
        Self::NumUnconfirmedTxs,
        Self::TxSearch,
        Self::BlockSearch,
        Self::Tx,
        Self::BroadcastEvidence,
        Self::BroadcastTxSync,
        Self::BroadcastTxAsync,
        Self::BroadcastTxCommit,
        Self::CheckTx,
        Self::AbciInfo,
        Self::AbciQuery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Status => "status",
            Self::NetInfo => "netInfo",
            Self::Blockchain => "blockchain",
            Self::Block => "block",
            Self::BlockByHash => "blockByHash",
            Self::BlockResults => "blockResults",
            Self::Commit => "commit",
            Self::Validators => "validators",
            Self::Genesis => "genesis",
            Self::DumpConsensusState => "dumpConsensusState",
            Self::ConsensusState => "consensusState",
            Self::ConsensusParams => "consensusParams",
            Self::UnconfirmedTxs => "unconfirmedTxs",
            Self::NumUnconfirmedTxs => "numUnconfirmedTxs",
            Self::TxSearch => "txSearch",
            Self::BlockSearch => "blockSearch",
            Self::Tx => "tx",
            Self::BroadcastEvidence => "broadcastEvidence",
            Self::BroadcastTxSync => "broadcastTxSync",
            Self::BroadcastTxAsync => "broadcastTxAsync",
            Self::BroadcastTxCommit => "broadcastTxCommit",
            Self::CheckTx => "checkTx",
            Self::AbciInfo => "abciInfo",
            Self::AbciQuery => "abciQuery",
        }
    }

    /// Node path of the method, e.g. `/net_info`
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Health => "/health",
            Self::Status => "/status",
            Self::NetInfo => "/net_info",
            Self::Blockchain => "/blockchain",
            Self::Block => "/block",
            Self::BlockByHash => "/block_by_hash",
            Self::BlockResults => "/block_results",
            Self::Commit => "/commit",
            Self::Validators => "/validators",
            Self::Genesis => "/genesis",
            Self::DumpConsensusState => "/dump_consensus_state",
            Self::ConsensusState => "/consensus_state",
            Self::ConsensusParams => "/consensus_params",
            Self::UnconfirmedTxs => "/unconfirmed_txs",
            Self::NumUnconfirmedTxs => "/num_unconfirmed_txs",
            Self::TxSearch => "/tx_search",
            Self::BlockSearch => "/block_search",
            Self::Tx => "/tx",
            Self::BroadcastEvidence => "/broadcast_evidence",
            Self::BroadcastTxSync => "/broadcast_tx_sync",
            Self::BroadcastTxAsync => "/broadcast_tx_async",
            Self::BroadcastTxCommit => "/broadcast_tx_commit",
            Self::CheckTx => "/check_tx",
            Self::AbciInfo => "/abci_info",
            Self::AbciQuery => "/abci_query",
        }
    }
}

impl FromStr for RpcMethod {
    type Err = String;

    /// Accepts the method name (`netInfo`) or its path (`net_info`, `/net_info`), ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim_start_matches('/');
        Self::ALL
            .into_iter()
            .find(|method| {
                method.as_str().eq_ignore_ascii_case(wanted)
                    || method.endpoint()[1..].eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown RPC method: {}", s))
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
