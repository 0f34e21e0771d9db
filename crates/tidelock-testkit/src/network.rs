//! In-process threshold-network double.
//!
//! Implements the client's transport interface with configurable quorum
//! behavior, delegation use-counting, and a condition-evaluation switch, so
//! the full decrypt flow can be exercised without a real node set.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tidelock_auth::AuthSignature;
use tidelock_client::{
    ActionSessionRequest, ClientError, DecryptRequest, DecryptionShare, DenialCode, EncryptReply,
    EncryptRequest, HandshakeReply, NodeReply, NodeTransport, Result, SessionAbility,
    ShareCombiner,
};
use tidelock_core::{sha256_hex, Sha256Digest};

/// A stub threshold network holding its "encrypted" payloads in memory.
///
/// Encryption stores the plaintext under an opaque ciphertext token;
/// decryption re-checks the session, capability uses, and condition switch
/// before every node releases its share.
pub struct StubNetwork {
    node_count: usize,
    threshold: usize,
    conditions_satisfied: AtomicBool,
    secrets: Mutex<HashMap<String, Vec<u8>>>,
    /// Remaining uses per delegation signature, initialized on first sight.
    delegation_uses: Mutex<HashMap<String, u32>>,
}

impl StubNetwork {
    /// A network of `node_count` nodes releasing shares once `threshold`
    /// agree.
    pub fn new(node_count: usize, threshold: usize) -> Arc<Self> {
        Arc::new(Self {
            node_count,
            threshold,
            conditions_satisfied: AtomicBool::new(true),
            secrets: Mutex::new(HashMap::new()),
            delegation_uses: Mutex::new(HashMap::new()),
        })
    }

    /// Flip the outcome of condition evaluation on every node.
    pub fn set_conditions_satisfied(&self, satisfied: bool) {
        self.conditions_satisfied.store(satisfied, Ordering::SeqCst);
    }

    /// Remaining uses recorded for a delegation signature, if seen.
    pub fn remaining_uses(&self, signature: &str) -> Option<u32> {
        self.delegation_uses
            .lock()
            .expect("lock poisoned")
            .get(signature)
            .copied()
    }

    fn deny(&self, code: DenialCode, message: &str) -> Vec<NodeReply> {
        (0..self.node_count)
            .map(|_| NodeReply::Denied {
                code,
                message: message.to_string(),
            })
            .collect()
    }

    fn evaluate(&self, request: &DecryptRequest) -> Vec<NodeReply> {
        let session = &request.session_sig;

        if session.is_expired(Utc::now()) {
            return self.deny(DenialCode::Unauthorized, "session signature expired");
        }

        let scoped = session.resource_ability_requests.iter().any(|r| {
            r.ability == SessionAbility::AccessControlConditionDecryption
        });
        if !scoped {
            return self.deny(
                DenialCode::Unauthorized,
                "session not scoped to condition decryption",
            );
        }

        if let Some(delegation) = session.capabilities.first() {
            let mut uses = self.delegation_uses.lock().expect("lock poisoned");
            let remaining = uses
                .entry(delegation.signature.sig.clone())
                .or_insert(delegation.uses);
            if *remaining == 0 {
                return self.deny(
                    DenialCode::CapacityExhausted,
                    "delegated capacity credit exhausted",
                );
            }
        }

        if !self.conditions_satisfied.load(Ordering::SeqCst) {
            return self.deny(DenialCode::ConditionNotMet, "predicate evaluated false");
        }

        let secrets = self.secrets.lock().expect("lock poisoned");
        let Some(plaintext) = secrets.get(&request.ciphertext) else {
            return self.deny(DenialCode::ConditionNotMet, "unknown ciphertext");
        };

        if sha256_hex(plaintext) != request.data_to_encrypt_hash {
            return self.deny(DenialCode::ConditionNotMet, "content hash mismatch");
        }

        // One use consumed per authorized decrypt round.
        if let Some(delegation) = session.capabilities.first() {
            let mut uses = self.delegation_uses.lock().expect("lock poisoned");
            if let Some(remaining) = uses.get_mut(&delegation.signature.sig) {
                *remaining -= 1;
            }
        }

        let share = BASE64.encode(plaintext);
        (0..self.node_count)
            .map(|_| NodeReply::Share {
                share: share.clone(),
            })
            .collect()
    }
}

/// Clonable transport handle over a shared [`StubNetwork`].
pub struct StubTransport(pub Arc<StubNetwork>);

#[async_trait]
impl NodeTransport for StubTransport {
    async fn handshake(&self) -> Result<HandshakeReply> {
        Ok(HandshakeReply {
            node_urls: (0..self.0.node_count)
                .map(|i| format!("stub://node-{i}"))
                .collect(),
            threshold: self.0.threshold,
            network_pubkey: "stub-network-pubkey".to_string(),
        })
    }

    async fn encrypt(&self, request: EncryptRequest) -> Result<EncryptReply> {
        let plaintext = BASE64
            .decode(&request.data_to_encrypt)
            .map_err(|e| ClientError::Transport(format!("invalid plaintext encoding: {e}")))?;

        // Opaque ciphertext token bound to this payload.
        let mut tag = [0u8; 16];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut tag);
        let mut token_input = plaintext.clone();
        token_input.extend_from_slice(&tag);
        let ciphertext = BASE64.encode(Sha256Digest::hash(&token_input).as_bytes());

        let hash = sha256_hex(&plaintext);
        self.0
            .secrets
            .lock()
            .expect("lock poisoned")
            .insert(ciphertext.clone(), plaintext);

        Ok(EncryptReply {
            ciphertext,
            data_to_encrypt_hash: hash,
        })
    }

    async fn decrypt(&self, request: DecryptRequest) -> Result<Vec<NodeReply>> {
        Ok(self.0.evaluate(&request))
    }

    async fn action_session(&self, request: ActionSessionRequest) -> Result<AuthSignature> {
        // Deterministic session material derived from the script identity.
        let digest = Sha256Digest::hash(request.code_hash.as_bytes());
        Ok(AuthSignature {
            sig: BASE64.encode(digest.as_bytes()),
            derived_via: "lit.action".to_string(),
            signed_message: digest.to_hex(),
            address: request.auth_sig.address.clone(),
            algo: request.auth_sig.algo.clone(),
            pub_key: request.public_key.clone(),
        })
    }
}

/// Combiner for stub shares: every share is the full secret, so combination
/// verifies agreement and returns the first payload.
pub struct PassthroughCombiner;

impl ShareCombiner for PassthroughCombiner {
    fn combine(&self, shares: &[DecryptionShare]) -> Result<Vec<u8>> {
        let first = shares
            .first()
            .ok_or_else(|| ClientError::Transport("no shares to combine".into()))?;
        if shares.iter().any(|s| s.payload != first.payload) {
            return Err(ClientError::Transport("shares disagree".into()));
        }
        Ok(first.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_encrypt_registers_secret() {
        let network = StubNetwork::new(3, 2);
        let transport = StubTransport(network.clone());

        let reply = transport
            .encrypt(EncryptRequest {
                data_to_encrypt: BASE64.encode(b"payload"),
                unified_access_control_conditions: vec![],
                chain: tidelock_conditions::CosmosChain::CheqdTestnet,
            })
            .await
            .unwrap();

        assert_eq!(reply.data_to_encrypt_hash, sha256_hex(b"payload"));
        assert!(network
            .secrets
            .lock()
            .unwrap()
            .contains_key(&reply.ciphertext));
    }

    #[test]
    fn test_passthrough_combiner_requires_agreement() {
        let combiner = PassthroughCombiner;
        let agree = vec![
            DecryptionShare {
                index: 0,
                payload: b"x".to_vec(),
            },
            DecryptionShare {
                index: 1,
                payload: b"x".to_vec(),
            },
        ];
        assert_eq!(combiner.combine(&agree).unwrap(), b"x");

        let disagree = vec![
            DecryptionShare {
                index: 0,
                payload: b"x".to_vec(),
            },
            DecryptionShare {
                index: 1,
                payload: b"y".to_vec(),
            },
        ];
        assert!(combiner.combine(&disagree).is_err());
    }
}
