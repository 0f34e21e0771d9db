//! Supported Cosmos-compatible chains.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A chain the threshold network can evaluate conditions against.
///
/// Closed enumeration: the network only recognizes these identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CosmosChain {
    #[serde(rename = "cosmos")]
    Cosmos,
    #[serde(rename = "cheqdMainnet")]
    CheqdMainnet,
    #[serde(rename = "cheqdTestnet")]
    CheqdTestnet,
}

/// Error for unrecognized chain identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized chain: {0}")]
pub struct UnknownChain(pub String);

impl CosmosChain {
    /// The wire identifier the network expects.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CosmosChain::Cosmos => "cosmos",
            CosmosChain::CheqdMainnet => "cheqdMainnet",
            CosmosChain::CheqdTestnet => "cheqdTestnet",
        }
    }

    /// Bech32 address prefix for wallets on this chain.
    pub const fn wallet_prefix(&self) -> &'static str {
        match self {
            CosmosChain::Cosmos => "cosmos",
            CosmosChain::CheqdMainnet | CosmosChain::CheqdTestnet => "cheqd",
        }
    }
}

impl FromStr for CosmosChain {
    type Err = UnknownChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cosmos" => Ok(CosmosChain::Cosmos),
            "cheqdMainnet" => Ok(CosmosChain::CheqdMainnet),
            "cheqdTestnet" => Ok(CosmosChain::CheqdTestnet),
            other => Err(UnknownChain(other.to_string())),
        }
    }
}

impl fmt::Display for CosmosChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for chain in [
            CosmosChain::Cosmos,
            CosmosChain::CheqdMainnet,
            CosmosChain::CheqdTestnet,
        ] {
            assert_eq!(chain.as_str().parse::<CosmosChain>().unwrap(), chain);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "osmosis".parse::<CosmosChain>(),
            Err(UnknownChain("osmosis".into()))
        );
    }

    #[test]
    fn test_wallet_prefixes() {
        assert_eq!(CosmosChain::Cosmos.wallet_prefix(), "cosmos");
        assert_eq!(CosmosChain::CheqdMainnet.wallet_prefix(), "cheqd");
        assert_eq!(CosmosChain::CheqdTestnet.wallet_prefix(), "cheqd");
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&CosmosChain::CheqdTestnet).unwrap();
        assert_eq!(json, "\"cheqdTestnet\"");
    }
}
