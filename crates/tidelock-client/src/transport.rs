//! Transport abstraction for the threshold network.
//!
//! One trait, two concrete implementations, selected by the explicit
//! [`crate::RuntimeEnvironment`] flag at client construction:
//!
//! - [`HttpTransport`] (server contexts): bootstraps the node set from a
//!   gateway, then fans decrypt requests out to every node directly.
//! - [`RelayTransport`] (browser contexts): sends each request once to a
//!   relay endpoint which performs the fan-out server-side.
//!
//! Each call is attempted exactly once; retry policy belongs to callers.
//! Timeouts are owned by the underlying HTTP client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tidelock_auth::AuthSignature;
use tidelock_conditions::{AccessControlCondition, CosmosChain};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::session::SessionSignature;

/// Result of the network handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandshakeReply {
    /// Endpoints of the participating nodes.
    pub node_urls: Vec<String>,
    /// Shares required before decryption can succeed.
    pub threshold: usize,
    /// The network's aggregate public encryption key.
    pub network_pubkey: String,
}

/// Threshold-encryption request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptRequest {
    /// Base64-encoded plaintext.
    pub data_to_encrypt: String,
    pub unified_access_control_conditions: Vec<AccessControlCondition>,
    pub chain: CosmosChain,
}

/// Threshold-encryption response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptReply {
    /// Base64-encoded network ciphertext.
    pub ciphertext: String,
    /// SHA-256 hex digest binding the ciphertext to its plaintext.
    pub data_to_encrypt_hash: String,
}

/// Per-node decryption request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptRequest {
    /// Base64-encoded network ciphertext.
    pub ciphertext: String,
    pub data_to_encrypt_hash: String,
    pub unified_access_control_conditions: Vec<AccessControlCondition>,
    pub chain: CosmosChain,
    pub session_sig: SessionSignature,
}

/// Why a node declined to release its share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialCode {
    /// The condition set evaluated false on this node's ledger view.
    ConditionNotMet,
    /// The presented capacity credit is exhausted or expired.
    CapacityExhausted,
    /// The session signature is invalid, expired, or mis-scoped.
    Unauthorized,
}

/// One node's answer to a decryption request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NodeReply {
    /// Conditions verified; the node released its key share.
    Share {
        /// Base64-encoded opaque share.
        share: String,
    },
    /// The node declined.
    Denied { code: DenialCode, message: String },
}

/// Request to derive session material by executing a pre-registered,
/// content-addressed authorization script on the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSessionRequest {
    /// Content hash identifying the registered script.
    pub code_hash: String,
    /// Public key the script's session material is bound to.
    pub public_key: String,
    /// Caller-supplied argument set.
    pub params: serde_json::Value,
    /// Auth material available to the script.
    pub auth_sig: AuthSignature,
}

/// Wire access to the threshold network.
#[async_trait]
pub trait NodeTransport: Send + Sync {
    /// Handshake and key-share registration. Must complete before any
    /// encrypt/decrypt round.
    async fn handshake(&self) -> Result<HandshakeReply>;

    /// Submit plaintext and conditions for threshold encryption.
    async fn encrypt(&self, request: EncryptRequest) -> Result<EncryptReply>;

    /// Submit a decryption request; returns one reply per reachable node.
    async fn decrypt(&self, request: DecryptRequest) -> Result<Vec<NodeReply>>;

    /// Have the network execute an authorization script and return the
    /// session auth material it produces.
    async fn action_session(&self, request: ActionSessionRequest) -> Result<AuthSignature>;
}

async fn post_json<B: Serialize, R: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<R> {
    let response = http
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| ClientError::Transport(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Transport(format!("{url}: HTTP {status}")));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Transport(format!("{url}: invalid response body: {e}")))
}

/// Direct transport for server contexts.
///
/// Learns the node set from the gateway at handshake, then talks to every
/// node for decryption rounds.
pub struct HttpTransport {
    gateway_url: String,
    http: reqwest::Client,
    nodes: tokio::sync::RwLock<Vec<String>>,
}

impl HttpTransport {
    /// Create a transport bootstrapping from `gateway_url`.
    pub fn new(gateway_url: String) -> Self {
        Self {
            gateway_url,
            http: reqwest::Client::new(),
            nodes: tokio::sync::RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl NodeTransport for HttpTransport {
    async fn handshake(&self) -> Result<HandshakeReply> {
        let url = format!("{}/web/handshake", self.gateway_url);
        let reply: HandshakeReply = post_json(&self.http, &url, &serde_json::json!({})).await?;
        debug!(
            nodes = reply.node_urls.len(),
            threshold = reply.threshold,
            "handshake complete"
        );
        *self.nodes.write().await = reply.node_urls.clone();
        Ok(reply)
    }

    async fn encrypt(&self, request: EncryptRequest) -> Result<EncryptReply> {
        let url = format!("{}/web/encryption/encrypt", self.gateway_url);
        post_json(&self.http, &url, &request).await
    }

    async fn decrypt(&self, request: DecryptRequest) -> Result<Vec<NodeReply>> {
        let nodes = self.nodes.read().await.clone();
        if nodes.is_empty() {
            return Err(ClientError::Transport(
                "node set unknown; handshake not performed".into(),
            ));
        }

        let mut tasks = JoinSet::new();
        for node in nodes {
            let http = self.http.clone();
            let request = request.clone();
            tasks.spawn(async move {
                let url = format!("{node}/web/encryption/retrieve");
                (node, post_json::<_, NodeReply>(&http, &url, &request).await)
            });
        }

        let mut replies = Vec::new();
        let mut last_error = None;
        while let Some(joined) = tasks.join_next().await {
            let (node, outcome) = joined
                .map_err(|e| ClientError::Transport(format!("decrypt task failed: {e}")))?;
            match outcome {
                Ok(reply) => replies.push(reply),
                Err(e) => {
                    // An unreachable node only shrinks the reply set; quorum
                    // may still be met by the rest.
                    warn!(node = %node, error = %e, "node unreachable during decrypt");
                    last_error = Some(e);
                }
            }
        }

        if replies.is_empty() {
            return Err(last_error
                .unwrap_or_else(|| ClientError::Transport("no nodes responded".into())));
        }
        Ok(replies)
    }

    async fn action_session(&self, request: ActionSessionRequest) -> Result<AuthSignature> {
        let url = format!("{}/web/execute", self.gateway_url);
        post_json(&self.http, &url, &request).await
    }
}

/// Relay transport for browser contexts.
///
/// All traffic goes through one relay endpoint; the relay performs the
/// node fan-out and returns the aggregated reply set.
pub struct RelayTransport {
    relay_url: String,
    http: reqwest::Client,
}

impl RelayTransport {
    /// Create a transport proxying through `relay_url`.
    pub fn new(relay_url: String) -> Self {
        Self {
            relay_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NodeTransport for RelayTransport {
    async fn handshake(&self) -> Result<HandshakeReply> {
        let url = format!("{}/relay/handshake", self.relay_url);
        post_json(&self.http, &url, &serde_json::json!({})).await
    }

    async fn encrypt(&self, request: EncryptRequest) -> Result<EncryptReply> {
        let url = format!("{}/relay/encrypt", self.relay_url);
        post_json(&self.http, &url, &request).await
    }

    async fn decrypt(&self, request: DecryptRequest) -> Result<Vec<NodeReply>> {
        let url = format!("{}/relay/decrypt", self.relay_url);
        post_json(&self.http, &url, &request).await
    }

    async fn action_session(&self, request: ActionSessionRequest) -> Result<AuthSignature> {
        let url = format!("{}/relay/execute", self.relay_url);
        post_json(&self.http, &url, &request).await
    }
}
