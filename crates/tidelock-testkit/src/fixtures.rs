//! Test fixtures wiring a client to the in-process network double.

use std::sync::Arc;
use tidelock::ResourceResolver;
use tidelock_client::{
    CapacityAuthority, ClientOptions, LitNetwork, ThresholdClient,
};
use tidelock_conditions::{inverse_timelock, AccessControlCondition, CosmosChain, ReturnValueTest};

use crate::ledger::StubLedger;
use crate::network::{PassthroughCombiner, StubNetwork, StubTransport};
use crate::signer::StubSigner;

/// A fully wired test environment: stub network, deterministic signer,
/// ledger double, and a connected-ready client.
pub struct TestHarness {
    pub network: Arc<StubNetwork>,
    pub signer: Arc<StubSigner>,
    pub client: ThresholdClient,
    pub authority: CapacityAuthority<StubLedger>,
}

impl TestHarness {
    /// Harness with a 3-node network and a threshold of 2.
    pub fn new() -> Self {
        Self::with_quorum(3, 2)
    }

    /// Harness with an explicit node count and threshold.
    pub fn with_quorum(node_count: usize, threshold: usize) -> Self {
        let network = StubNetwork::new(node_count, threshold);
        let signer = Arc::new(StubSigner::default());
        let options = ClientOptions::new(LitNetwork::Localhost, CosmosChain::CheqdTestnet);
        let client = ThresholdClient::with_transport(
            options,
            Box::new(StubTransport(network.clone())),
            signer.clone(),
            Arc::new(PassthroughCombiner),
        );
        Self {
            network,
            signer,
            client,
            authority: CapacityAuthority::new(StubLedger::default()),
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A payment-window condition with realistic parameters.
pub fn sample_inverse_timelock() -> AccessControlCondition {
    inverse_timelock(
        ReturnValueTest::with_key("$.tx_responses.*.timestamp", "<=", "300"),
        "100ncheq",
        Some("cheqd1l9sq0se0jd3vklyrrtjchx4ua47awug5vsyeeh"),
        None,
        CosmosChain::CheqdTestnet,
    )
}

/// In-memory resource resolver serving pre-registered payloads.
pub struct StaticResolver {
    resources: std::collections::HashMap<(String, String), tidelock::StoredResource>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self {
            resources: std::collections::HashMap::new(),
        }
    }

    /// Register a resource under `(identifier, resource_id)`.
    pub fn insert(
        &mut self,
        identifier: impl Into<String>,
        resource_id: impl Into<String>,
        resource: tidelock::StoredResource,
    ) {
        self.resources
            .insert((identifier.into(), resource_id.into()), resource);
    }
}

impl Default for StaticResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ResourceResolver for StaticResolver {
    async fn fetch(
        &self,
        identifier: &str,
        resource_id: &str,
    ) -> tidelock::Result<tidelock::StoredResource> {
        self.resources
            .get(&(identifier.to_string(), resource_id.to_string()))
            .cloned()
            .ok_or_else(|| {
                tidelock::Error::Resolver(format!("{identifier}/{resource_id} not found"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_harness_connects() {
        let harness = TestHarness::new();
        harness.client.connect().await.unwrap();
        assert!(harness.client.is_connected().await);
    }

    #[tokio::test]
    async fn test_static_resolver() {
        let mut resolver = StaticResolver::new();
        resolver.insert(
            "did:cheqd:testnet:abc",
            "res-1",
            tidelock::StoredResource {
                encoded: "aa-bb".to_string(),
                hash: "00".repeat(32),
                conditions: vec![sample_inverse_timelock()],
            },
        );

        let found = resolver.fetch("did:cheqd:testnet:abc", "res-1").await;
        assert!(found.is_ok());

        let missing = resolver.fetch("did:cheqd:testnet:abc", "res-2").await;
        assert!(matches!(missing, Err(tidelock::Error::Resolver(_))));
    }
}
