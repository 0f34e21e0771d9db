//! Client configuration: network selection and runtime environment.
//!
//! All configuration passes through these structs at construction; the
//! client holds no process-wide state and never inspects ambient globals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tidelock_conditions::CosmosChain;

use crate::error::ClientError;

/// Threshold networks the client can join.
///
/// Closed enumeration; anything else is a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LitNetwork {
    #[serde(rename = "datil")]
    Datil,
    #[serde(rename = "datil-test")]
    DatilTest,
    #[serde(rename = "datil-dev")]
    DatilDev,
    #[serde(rename = "localhost")]
    Localhost,
}

/// Error for unrecognized network identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized network: {0}")]
pub struct UnknownNetwork(pub String);

impl From<UnknownNetwork> for ClientError {
    fn from(e: UnknownNetwork) -> Self {
        ClientError::Configuration(e.to_string())
    }
}

impl LitNetwork {
    /// The wire identifier of this network.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LitNetwork::Datil => "datil",
            LitNetwork::DatilTest => "datil-test",
            LitNetwork::DatilDev => "datil-dev",
            LitNetwork::Localhost => "localhost",
        }
    }

    /// Default gateway endpoint used to bootstrap the node set.
    pub const fn default_gateway(&self) -> &'static str {
        match self {
            LitNetwork::Datil => "https://datil.litgateway.com",
            LitNetwork::DatilTest => "https://datil-test.litgateway.com",
            LitNetwork::DatilDev => "https://datil-dev.litgateway.com",
            LitNetwork::Localhost => "http://127.0.0.1:7470",
        }
    }

    /// Default relay endpoint for browser-context transports.
    pub const fn default_relay(&self) -> &'static str {
        match self {
            LitNetwork::Datil => "https://relay.litgateway.com",
            LitNetwork::DatilTest => "https://relay.datil-test.litgateway.com",
            LitNetwork::DatilDev => "https://relay.datil-dev.litgateway.com",
            LitNetwork::Localhost => "http://127.0.0.1:7471",
        }
    }
}

impl FromStr for LitNetwork {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "datil" => Ok(LitNetwork::Datil),
            "datil-test" => Ok(LitNetwork::DatilTest),
            "datil-dev" => Ok(LitNetwork::DatilDev),
            "localhost" => Ok(LitNetwork::Localhost),
            other => Err(UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for LitNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The execution environment the client runs in, stated explicitly by the
/// caller. Determines which transport implementation is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// Long-lived process with direct access to the node set.
    Server,
    /// Sandboxed context that must proxy through a relay endpoint.
    Browser,
    /// Anything else; no transport applies.
    Unknown,
}

/// Configuration for a [`crate::ThresholdClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Threshold network to join.
    pub network: LitNetwork,
    /// Chain conditions are evaluated against.
    pub chain: CosmosChain,
    /// Execution environment, stated explicitly.
    pub environment: RuntimeEnvironment,
    /// Override for the network's default gateway endpoint.
    pub gateway_url: Option<String>,
    /// Override for the network's default relay endpoint.
    pub relay_url: Option<String>,
}

impl ClientOptions {
    /// Options for the given network and chain, in a server environment.
    pub fn new(network: LitNetwork, chain: CosmosChain) -> Self {
        Self {
            network,
            chain,
            environment: RuntimeEnvironment::Server,
            gateway_url: None,
            relay_url: None,
        }
    }

    /// Parse network and chain from their wire identifiers.
    pub fn parse(network: &str, chain: &str) -> Result<Self, ClientError> {
        Ok(Self::new(network.parse()?, chain.parse()?))
    }

    /// Set the execution environment.
    pub fn environment(mut self, environment: RuntimeEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the gateway endpoint.
    pub fn gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = Some(url.into());
        self
    }

    /// Override the relay endpoint.
    pub fn relay_url(mut self, url: impl Into<String>) -> Self {
        self.relay_url = Some(url.into());
        self
    }

    /// Effective gateway endpoint.
    pub fn gateway_endpoint(&self) -> String {
        self.gateway_url
            .clone()
            .unwrap_or_else(|| self.network.default_gateway().to_string())
    }

    /// Effective relay endpoint.
    pub fn relay_endpoint(&self) -> String {
        self.relay_url
            .clone()
            .unwrap_or_else(|| self.network.default_relay().to_string())
    }
}

impl Default for ClientOptions {
    /// Defaults match the protocol's reference client: `datil-dev` on
    /// `cheqdTestnet`, server environment.
    fn default() -> Self {
        Self::new(LitNetwork::DatilDev, CosmosChain::CheqdTestnet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_parse_roundtrip() {
        for network in [
            LitNetwork::Datil,
            LitNetwork::DatilTest,
            LitNetwork::DatilDev,
            LitNetwork::Localhost,
        ] {
            assert_eq!(network.as_str().parse::<LitNetwork>().unwrap(), network);
        }
    }

    #[test]
    fn test_network_parse_rejects_unknown() {
        assert_eq!(
            "datil-vdev".parse::<LitNetwork>(),
            Err(UnknownNetwork("datil-vdev".into()))
        );
    }

    #[test]
    fn test_options_parse_invalid_is_configuration_error() {
        let err = ClientOptions::parse("datil-vdev", "cheqdTestnet").unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));

        let err = ClientOptions::parse("datil-dev", "solana").unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn test_default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.network, LitNetwork::DatilDev);
        assert_eq!(options.chain, CosmosChain::CheqdTestnet);
        assert_eq!(options.environment, RuntimeEnvironment::Server);
    }

    #[test]
    fn test_endpoint_overrides() {
        let options = ClientOptions::default().gateway_url("http://10.0.0.1:7470");
        assert_eq!(options.gateway_endpoint(), "http://10.0.0.1:7470");
        assert_eq!(
            options.relay_endpoint(),
            LitNetwork::DatilDev.default_relay()
        );
    }
}
