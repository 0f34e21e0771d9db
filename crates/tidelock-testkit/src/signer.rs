//! Identity-prover doubles.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ed25519_dalek::{Signer, SigningKey};
use std::sync::Mutex;
use tidelock_auth::{IdentityProver, Result, SignDoc, WalletAccount};
use tidelock_core::Sha256Digest;

/// Default address for the deterministic stub signer; matches the golden
/// sign-doc vectors.
pub const STUB_ADDRESS: &str = "cosmos1v9mbh5gr5mrpy0a44qutsjcwmetgu7cgepzjwd";

/// Deterministic signer: fixed account, signature = SHA-256 of the
/// canonical document. Records every document it signs so tests can assert
/// on the exact challenge.
pub struct StubSigner {
    account: WalletAccount,
    signed: Mutex<Vec<SignDoc>>,
}

impl StubSigner {
    /// Stub signer for `address`.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            account: WalletAccount {
                address: address.into(),
                pubkey: BASE64.encode(b"stub-pubkey"),
                algo: "secp256k1".to_string(),
            },
            signed: Mutex::new(Vec::new()),
        }
    }

    /// Documents signed so far, in order.
    pub fn signed_documents(&self) -> Vec<SignDoc> {
        self.signed.lock().expect("lock poisoned").clone()
    }
}

impl Default for StubSigner {
    fn default() -> Self {
        Self::new(STUB_ADDRESS)
    }
}

#[async_trait]
impl IdentityProver for StubSigner {
    async fn accounts(&self) -> Result<Vec<WalletAccount>> {
        Ok(vec![self.account.clone()])
    }

    async fn sign_document(&self, _address: &str, doc: &SignDoc) -> Result<Vec<u8>> {
        self.signed.lock().expect("lock poisoned").push(doc.clone());
        let bytes = doc.canonical_bytes()?;
        Ok(Sha256Digest::hash(&bytes).as_bytes().to_vec())
    }
}

/// Software signer backed by a real Ed25519 key.
pub struct SoftwareSigner {
    signing_key: SigningKey,
    address: String,
}

impl SoftwareSigner {
    /// Deterministic signer from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        // Address derived from the verifying key; bech32 is out of scope
        // for a test double.
        let digest = Sha256Digest::hash(signing_key.verifying_key().as_bytes());
        let address = format!("cheqd1{}", &digest.to_hex()[..32]);
        Self {
            signing_key,
            address,
        }
    }

    /// This signer's address.
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl IdentityProver for SoftwareSigner {
    async fn accounts(&self) -> Result<Vec<WalletAccount>> {
        Ok(vec![WalletAccount {
            address: self.address.clone(),
            pubkey: BASE64.encode(self.signing_key.verifying_key().as_bytes()),
            algo: "ed25519".to_string(),
        }])
    }

    async fn sign_document(&self, _address: &str, doc: &SignDoc) -> Result<Vec<u8>> {
        let bytes = doc.canonical_bytes()?;
        Ok(self.signing_key.sign(&bytes).to_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidelock_auth::{generate_auth_signature, AUTH_CHALLENGE};

    #[tokio::test]
    async fn test_stub_signer_records_documents() {
        let signer = StubSigner::default();
        generate_auth_signature(&signer).await.unwrap();

        let docs = signer.signed_documents();
        assert_eq!(docs.len(), 1);
        let data = BASE64.decode(&docs[0].msgs[0].value.data).unwrap();
        assert_eq!(data, AUTH_CHALLENGE.as_bytes());
    }

    #[tokio::test]
    async fn test_stub_signer_deterministic() {
        let signer = StubSigner::default();
        let a = generate_auth_signature(&signer).await.unwrap();
        let b = generate_auth_signature(&signer).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_software_signer_from_seed_is_stable() {
        let a = SoftwareSigner::from_seed(&[0x42; 32]);
        let b = SoftwareSigner::from_seed(&[0x42; 32]);
        assert_eq!(a.address(), b.address());

        let auth_a = generate_auth_signature(&a).await.unwrap();
        let auth_b = generate_auth_signature(&b).await.unwrap();
        assert_eq!(auth_a, auth_b);
    }
}
