//! In-memory ledger double for capacity-credit flows.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use tidelock_auth::{AuthSignature, DERIVED_VIA};
use tidelock_client::{DelegationGrant, LedgerClient, LedgerError, MintParams, MintedCredit};
use tidelock_core::{canonical_json, Sha256Digest};

/// Ledger double: sequential token ids, single owner, deterministic
/// delegation signatures.
pub struct StubLedger {
    owner: String,
    tokens: Mutex<HashSet<String>>,
    next_token: AtomicU32,
}

impl StubLedger {
    /// Ledger whose signer is `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            tokens: Mutex::new(HashSet::new()),
            next_token: AtomicU32::new(1),
        }
    }

    /// The signing address behind this ledger.
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl Default for StubLedger {
    fn default() -> Self {
        Self::new("cheqd1rnr5jrt4exl0samwj0yegv99jeskl0hsxmcz96")
    }
}

#[async_trait]
impl LedgerClient for StubLedger {
    async fn submit_mint(&self, _params: &MintParams) -> Result<MintedCredit, LedgerError> {
        let id = self.next_token.fetch_add(1, Ordering::SeqCst);
        let token_id = id.to_string();
        self.tokens
            .lock()
            .expect("lock poisoned")
            .insert(token_id.clone());
        Ok(MintedCredit {
            token_id,
            tx_hash: format!("0x{id:064x}"),
        })
    }

    async fn submit_delegation(
        &self,
        grant: &DelegationGrant,
    ) -> Result<AuthSignature, LedgerError> {
        if !self
            .tokens
            .lock()
            .expect("lock poisoned")
            .contains(&grant.token_id)
        {
            return Err(LedgerError::NotTokenOwner(grant.token_id.clone()));
        }

        // Deterministic signature over the canonical grant.
        let bytes = canonical_json(grant)
            .map_err(|e| LedgerError::Submission(e.to_string()))?;
        let digest = Sha256Digest::hash(&bytes);

        Ok(AuthSignature {
            sig: BASE64.encode(digest.as_bytes()),
            derived_via: DERIVED_VIA.to_string(),
            signed_message: digest.to_hex(),
            address: self.owner.clone(),
            algo: "secp256k1".to_string(),
            pub_key: BASE64.encode(self.owner.as_bytes()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mint_then_delegate() {
        let ledger = StubLedger::default();
        let minted = ledger
            .submit_mint(&MintParams::effective_days(1))
            .await
            .unwrap();

        let grant = DelegationGrant {
            token_id: minted.token_id,
            delegatee_addresses: vec!["cheqd1x".to_string()],
            uses: 1,
            expiration: None,
            statement: None,
        };
        let signature = ledger.submit_delegation(&grant).await.unwrap();
        assert_eq!(signature.address, ledger.owner());
    }

    #[tokio::test]
    async fn test_delegation_requires_ownership() {
        let ledger = StubLedger::default();
        let grant = DelegationGrant {
            token_id: "999".to_string(),
            delegatee_addresses: vec!["cheqd1x".to_string()],
            uses: 1,
            expiration: None,
            statement: None,
        };
        assert!(matches!(
            ledger.submit_delegation(&grant).await,
            Err(LedgerError::NotTokenOwner(_))
        ));
    }

    #[tokio::test]
    async fn test_delegation_signature_deterministic() {
        let ledger = StubLedger::default();
        let minted = ledger
            .submit_mint(&MintParams::effective_days(1))
            .await
            .unwrap();
        let grant = DelegationGrant {
            token_id: minted.token_id,
            delegatee_addresses: vec!["cheqd1x".to_string()],
            uses: 2,
            expiration: None,
            statement: None,
        };
        let a = ledger.submit_delegation(&grant).await.unwrap();
        let b = ledger.submit_delegation(&grant).await.unwrap();
        assert_eq!(a, b);
    }
}
