//! Built-in table of supported chains and their public endpoints.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Node URLs of a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainUrls {
    pub rpc: String,
    pub rest: String,
    pub socket: String,
}

/// Bech32 address prefixes of a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainPrefixes {
    pub prefix: String,
    pub valoper_prefix: String,
    pub cons_prefix: String,
}

/// Static information about one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub name: String,
    pub urls: ChainUrls,
    pub prefixes: ChainPrefixes,
    /// Decimal places of the staking denomination
    pub decimals: u8,
}

impl ChainInfo {
    fn new(
        name: &str,
        (rpc, rest, socket): (&str, &str, &str),
        (prefix, valoper_prefix, cons_prefix): (&str, &str, &str),
        decimals: u8,
    ) -> Self {
        Self {
            name: name.to_string(),
            urls: ChainUrls {
                rpc: rpc.to_string(),
                rest: rest.to_string(),
                socket: socket.to_string(),
            },
            prefixes: ChainPrefixes {
                prefix: prefix.to_string(),
                valoper_prefix: valoper_prefix.to_string(),
                cons_prefix: cons_prefix.to_string(),
            },
            decimals,
        }
    }
}

static CHAINS: Lazy<Vec<ChainInfo>> = Lazy::new(|| {
    vec![
        ChainInfo::new(
            "Axelar",
            (
                "https://rpc.cosmos.directory/axelar",
                "https://axelar-api.polkachu.com",
                "wss://axelar-rpc.chainode.tech/websocket",
            ),
            ("axelar", "axelarvaloper", "axelarvalcon"),
            6,
        ),
        ChainInfo::new(
            "Celestia",
            (
                "https://rpc.celestia.testnet.run",
                "https://api.celestia.testnet.run",
                "wss://rpc.celestia.testnet.run/websocket",
            ),
            ("celestia", "celestiavaloper", "celestiavalcon"),
            6,
        ),
        ChainInfo::new(
            "Kyve",
            (
                "https://rpc.beta.kyve.network",
                "https://api.beta.kyve.network",
                "wss://rpc.beta.kyve.network/websocket",
            ),
            ("kyve", "kyvevaloper", "kyvevalcon"),
            6,
        ),
        ChainInfo::new(
            "Osmosis",
            (
                "https://rpc.cosmos.directory/osmosis",
                "https://rest.cosmos.directory/osmosis",
                "wss://rpc.osmosis.interbloc.org/websocket",
            ),
            ("osmosis", "osmovaloper", "osmovalcons"),
            6,
        ),
        // Secret is served through the Osmosis directory nodes
        ChainInfo::new(
            "Secret",
            (
                "https://rpc.cosmos.directory/osmosis",
                "https://rest.cosmos.directory/osmosis",
                "wss://rpc.osmosis.interbloc.org/websocket",
            ),
            ("secret", "secretvaloper", "secretvalcon"),
            6,
        ),
        ChainInfo::new(
            "Evmos",
            (
                "https://rpc.cosmos.directory/evmos",
                "https://evmos-api.polkachu.com",
                "wss://rpc.evmos.bh.rocks/websocket",
            ),
            ("evmos", "evmosvaloper", "evmosvalcon"),
            18,
        ),
    ]
});

/// Every built-in chain
pub fn all() -> &'static [ChainInfo] {
    &CHAINS
}

/// Look up a built-in chain by name, ignoring case
pub fn find(name: &str) -> Result<&'static ChainInfo> {
    CHAINS
        .iter()
        .find(|chain| chain.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownChain(name.to_string()))
}
