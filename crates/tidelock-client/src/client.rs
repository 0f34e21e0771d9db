//! The threshold-network client.
//!
//! One instance owns one connection: `Disconnected → Connected` via
//! [`ThresholdClient::connect`], with per-session authentication layered on
//! top. There is no automatic reconnect and no built-in retry; each network
//! call is attempted once and its typed outcome returned immediately.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use std::sync::Arc;
use tidelock_auth::{generate_auth_signature, IdentityProver};
use tidelock_conditions::AccessControlCondition;
use tidelock_core::CoreError;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::capacity::DelegationAuthorization;
use crate::config::{ClientOptions, RuntimeEnvironment};
use crate::error::{ClientError, Result};
use crate::session::SessionSignature;
use crate::transport::{
    ActionSessionRequest, DecryptRequest, DenialCode, EncryptRequest, HttpTransport, NodeReply,
    NodeTransport, RelayTransport,
};

/// One node's released key share, opaque to this crate.
#[derive(Debug, Clone)]
pub struct DecryptionShare {
    /// Position of the node in the reply set.
    pub index: usize,
    /// Raw share bytes.
    pub payload: Vec<u8>,
}

/// Combines a quorum of released key shares into plaintext.
///
/// The combination scheme is a capability of the external network (BLS in
/// production); the client only drives it.
pub trait ShareCombiner: Send + Sync {
    /// Combine `shares` (at least the network threshold) into plaintext.
    fn combine(&self, shares: &[DecryptionShare]) -> Result<Vec<u8>>;
}

/// Network ciphertext plus its content-binding hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdSealed {
    /// Opaque network ciphertext.
    pub ciphertext: Vec<u8>,
    /// SHA-256 hex digest of the plaintext.
    pub content_hash: String,
}

/// A pre-registered, content-addressed authorization script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBinding {
    /// Content hash identifying the script.
    pub code_hash: String,
    /// Public key the script's session material is bound to.
    pub public_key: String,
}

/// Quorum parameters learned at handshake.
#[derive(Debug, Clone, Copy)]
struct QuorumInfo {
    node_count: usize,
    threshold: usize,
}

/// Stateful session wrapper around the threshold network.
pub struct ThresholdClient {
    options: ClientOptions,
    transport: Box<dyn NodeTransport>,
    prover: Arc<dyn IdentityProver>,
    combiner: Arc<dyn ShareCombiner>,
    /// `None` while disconnected.
    quorum: RwLock<Option<QuorumInfo>>,
    /// Cached session signature, reused until expiry.
    session: RwLock<Option<SessionSignature>>,
}

impl std::fmt::Debug for ThresholdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThresholdClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ThresholdClient {
    /// Construct a client, selecting the transport implementation from the
    /// explicit environment flag in `options`.
    ///
    /// Fails with [`ClientError::UnsupportedEnvironment`] before any network
    /// call when no transport applies.
    pub fn new(
        options: ClientOptions,
        prover: Arc<dyn IdentityProver>,
        combiner: Arc<dyn ShareCombiner>,
    ) -> Result<Self> {
        let transport: Box<dyn NodeTransport> = match options.environment {
            RuntimeEnvironment::Server => Box::new(HttpTransport::new(options.gateway_endpoint())),
            RuntimeEnvironment::Browser => Box::new(RelayTransport::new(options.relay_endpoint())),
            RuntimeEnvironment::Unknown => {
                return Err(ClientError::UnsupportedEnvironment(
                    "no transport matches the configured runtime".into(),
                ))
            }
        };
        Ok(Self::with_transport(options, transport, prover, combiner))
    }

    /// Construct a client over a caller-supplied transport.
    ///
    /// Used for localhost networks and test doubles; skips environment
    /// selection but keeps every other contract.
    pub fn with_transport(
        options: ClientOptions,
        transport: Box<dyn NodeTransport>,
        prover: Arc<dyn IdentityProver>,
        combiner: Arc<dyn ShareCombiner>,
    ) -> Self {
        Self {
            options,
            transport,
            prover,
            combiner,
            quorum: RwLock::new(None),
            session: RwLock::new(None),
        }
    }

    /// The configured options.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Perform the network handshake and key-share registration.
    ///
    /// Idempotent once connected. All other operations require a completed
    /// `connect()`.
    pub async fn connect(&self) -> Result<()> {
        let mut quorum = self.quorum.write().await;
        if quorum.is_some() {
            return Ok(());
        }

        let reply = self.transport.handshake().await?;
        info!(
            network = %self.options.network,
            nodes = reply.node_urls.len(),
            threshold = reply.threshold,
            "connected to threshold network"
        );
        *quorum = Some(QuorumInfo {
            node_count: reply.node_urls.len(),
            threshold: reply.threshold,
        });
        Ok(())
    }

    /// Whether `connect()` has completed.
    pub async fn is_connected(&self) -> bool {
        self.quorum.read().await.is_some()
    }

    async fn ensure_connected(&self) -> Result<QuorumInfo> {
        self.quorum
            .read()
            .await
            .as_ref()
            .copied()
            .ok_or(ClientError::NotConnected)
    }

    /// Submit `plaintext` and its condition set for threshold encryption.
    pub async fn encrypt(
        &self,
        plaintext: &[u8],
        conditions: &[AccessControlCondition],
    ) -> Result<ThresholdSealed> {
        self.ensure_connected().await?;

        let request = EncryptRequest {
            data_to_encrypt: BASE64.encode(plaintext),
            unified_access_control_conditions: conditions.to_vec(),
            chain: self.options.chain,
        };

        debug!(conditions = conditions.len(), "submitting threshold encrypt");
        let reply = self
            .transport
            .encrypt(request)
            .await
            .map_err(|e| ClientError::Encryption(e.to_string()))?;

        let ciphertext = BASE64
            .decode(&reply.ciphertext)
            .map_err(|e| ClientError::Encryption(format!("invalid ciphertext encoding: {e}")))?;

        Ok(ThresholdSealed {
            ciphertext,
            content_hash: reply.data_to_encrypt_hash,
        })
    }

    /// Decrypt a network ciphertext under its condition set.
    ///
    /// Session signatures are acquired lazily: a cached, unexpired session
    /// carrying the same capability proof is reused; otherwise the injected
    /// identity prover signs a direct auth challenge. When `delegation` is
    /// supplied it is forwarded to the network as a capability proof.
    pub async fn decrypt(
        &self,
        ciphertext: &[u8],
        content_hash: &str,
        conditions: &[AccessControlCondition],
        delegation: Option<&DelegationAuthorization>,
    ) -> Result<String> {
        let quorum = self.ensure_connected().await?;
        let session = self.session_signature(delegation).await?;
        let request = self.decrypt_request(ciphertext, content_hash, conditions, session);
        self.submit_decrypt(request, quorum).await
    }

    /// Decrypt with session signatures derived by network execution of a
    /// pre-registered authorization script.
    ///
    /// Action-derived sessions are parameterized by `params` and are not
    /// cached.
    pub async fn decrypt_via_action(
        &self,
        ciphertext: &[u8],
        content_hash: &str,
        conditions: &[AccessControlCondition],
        action: &ActionBinding,
        params: serde_json::Value,
        delegation: Option<&DelegationAuthorization>,
    ) -> Result<String> {
        let quorum = self.ensure_connected().await?;

        let auth_sig = generate_auth_signature(self.prover.as_ref()).await?;
        let action_sig = self
            .transport
            .action_session(ActionSessionRequest {
                code_hash: action.code_hash.clone(),
                public_key: action.public_key.clone(),
                params,
                auth_sig,
            })
            .await?;

        let session = SessionSignature::for_decryption(action_sig, delegation.cloned(), Utc::now());
        let request = self.decrypt_request(ciphertext, content_hash, conditions, session);
        self.submit_decrypt(request, quorum).await
    }

    fn decrypt_request(
        &self,
        ciphertext: &[u8],
        content_hash: &str,
        conditions: &[AccessControlCondition],
        session: SessionSignature,
    ) -> DecryptRequest {
        DecryptRequest {
            ciphertext: BASE64.encode(ciphertext),
            data_to_encrypt_hash: content_hash.to_string(),
            unified_access_control_conditions: conditions.to_vec(),
            chain: self.options.chain,
            session_sig: session,
        }
    }

    async fn submit_decrypt(&self, request: DecryptRequest, quorum: QuorumInfo) -> Result<String> {
        debug!(
            node_count = quorum.node_count,
            threshold = quorum.threshold,
            "submitting threshold decrypt"
        );
        let replies = self.transport.decrypt(request).await?;

        let mut shares = Vec::new();
        let mut denials = Vec::new();
        for (index, reply) in replies.into_iter().enumerate() {
            match reply {
                NodeReply::Share { share } => {
                    let payload = BASE64.decode(&share).map_err(|e| {
                        ClientError::Transport(format!("invalid share encoding: {e}"))
                    })?;
                    shares.push(DecryptionShare { index, payload });
                }
                NodeReply::Denied { code, message } => denials.push((code, message)),
            }
        }

        if shares.len() < quorum.threshold {
            let unauthorized = denials
                .iter()
                .filter(|(code, _)| *code == DenialCode::Unauthorized)
                .count();
            if !denials.is_empty() && unauthorized == denials.len() {
                let (_, message) = &denials[0];
                return Err(ClientError::Auth(message.clone()));
            }
            return Err(ClientError::ConditionNotMet(format!(
                "quorum not reached: {} of {} required shares released",
                shares.len(),
                quorum.threshold
            )));
        }

        let plaintext = self.combiner.combine(&shares)?;
        String::from_utf8(plaintext)
            .map_err(|_| CoreError::Format("decrypted payload is not valid UTF-8".into()).into())
    }

    /// Return a valid session signature, generating one on cache miss.
    async fn session_signature(
        &self,
        delegation: Option<&DelegationAuthorization>,
    ) -> Result<SessionSignature> {
        let now = Utc::now();
        {
            let cached = self.session.read().await;
            if let Some(session) = cached.as_ref() {
                if !session.is_expired(now) && session.carries(delegation) {
                    return Ok(session.clone());
                }
            }
        }

        // Cache miss: have the wallet sign a direct auth challenge.
        debug!("no cached session signature; proving identity");
        let auth_sig = generate_auth_signature(self.prover.as_ref()).await?;
        let session = SessionSignature::for_decryption(auth_sig, delegation.cloned(), now);
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tidelock_auth::{AuthError, SignDoc, WalletAccount};

    struct NoopProver;

    #[async_trait]
    impl IdentityProver for NoopProver {
        async fn accounts(&self) -> std::result::Result<Vec<WalletAccount>, AuthError> {
            Ok(vec![WalletAccount {
                address: "cheqd1noop".to_string(),
                pubkey: "cGs=".to_string(),
                algo: "secp256k1".to_string(),
            }])
        }

        async fn sign_document(
            &self,
            _address: &str,
            _doc: &SignDoc,
        ) -> std::result::Result<Vec<u8>, AuthError> {
            Ok(vec![0u8; 64])
        }
    }

    struct NoopCombiner;

    impl ShareCombiner for NoopCombiner {
        fn combine(&self, shares: &[DecryptionShare]) -> Result<Vec<u8>> {
            Ok(shares[0].payload.clone())
        }
    }

    #[test]
    fn test_unknown_environment_fails_before_any_network_call() {
        let options = ClientOptions::default().environment(RuntimeEnvironment::Unknown);
        let err = ThresholdClient::new(options, Arc::new(NoopProver), Arc::new(NoopCombiner))
            .unwrap_err();
        assert!(matches!(err, ClientError::UnsupportedEnvironment(_)));
    }

    #[test]
    fn test_recognized_environments_construct() {
        for environment in [RuntimeEnvironment::Server, RuntimeEnvironment::Browser] {
            let options = ClientOptions::default().environment(environment);
            assert!(
                ThresholdClient::new(options, Arc::new(NoopProver), Arc::new(NoopCombiner))
                    .is_ok()
            );
        }
    }

    #[tokio::test]
    async fn test_operations_require_connect() {
        let options = ClientOptions::default();
        let client =
            ThresholdClient::new(options, Arc::new(NoopProver), Arc::new(NoopCombiner)).unwrap();

        assert!(!client.is_connected().await);
        let err = client.encrypt(b"plaintext", &[]).await.unwrap_err();
        assert!(matches!(err, ClientError::NotConnected));

        let err = client.decrypt(b"ct", "00", &[], None).await.unwrap_err();
        assert!(matches!(err, ClientError::NotConnected));
    }
}
