//! Hybrid seal/open flow.
//!
//! A payload is encrypted twice: locally with a symmetric envelope whose
//! key the caller keeps, and by the threshold network under a condition
//! set. Both ciphertexts are stored together as one delimited string
//! alongside the content hash and the conditions.
//!
//! Opening goes through the network by default ([`open`]); the symmetric
//! half remains functional as the offline recovery path ([`open_local`])
//! for callers that still hold the exported key.

use serde::{Deserialize, Serialize};
use tidelock_client::{DelegationAuthorization, ThresholdClient};
use tidelock_conditions::AccessControlCondition;
use tidelock_core::{codec, CoreError, SymmetricEnvelope, SymmetricKey};
use tracing::debug;

use crate::error::{Error, Result};

/// The persisted form of a hybrid-encrypted payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResource {
    /// Hybrid ciphertext: `<hex symmetric envelope>-<hex network ciphertext>`.
    pub encoded: String,
    /// SHA-256 hex digest of the plaintext.
    pub hash: String,
    /// Conditions gating network decryption.
    pub conditions: Vec<AccessControlCondition>,
}

impl StoredResource {
    /// Serialize to the stored UTF-8 JSON form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Resolver(e.to_string()))
    }

    /// Deserialize from the stored UTF-8 JSON form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| CoreError::Format(e.to_string()).into())
    }
}

/// Encrypt `plaintext` both locally and on the network, gated by
/// `conditions`. Returns the stored resource and the exported symmetric
/// key, which the caller owns exclusively.
pub async fn seal(
    plaintext: &[u8],
    conditions: &[AccessControlCondition],
    client: &ThresholdClient,
) -> Result<(StoredResource, SymmetricKey)> {
    let sealed = SymmetricEnvelope::seal(plaintext)?;
    let network = client.encrypt(plaintext, conditions).await?;

    let encoded = codec::encode(&sealed.envelope.to_hex(), &hex::encode(&network.ciphertext))?;
    debug!(
        conditions = conditions.len(),
        hash = %network.content_hash,
        "sealed hybrid resource"
    );

    Ok((
        StoredResource {
            encoded,
            hash: network.content_hash,
            conditions: conditions.to_vec(),
        },
        sealed.key,
    ))
}

/// Decrypt the threshold segment of a stored resource via the network.
pub async fn open(
    resource: &StoredResource,
    client: &ThresholdClient,
    delegation: Option<&DelegationAuthorization>,
) -> Result<String> {
    let (_, threshold_segment) = codec::decode(&resource.encoded, true)?;
    let ciphertext =
        hex::decode(threshold_segment).map_err(|e| CoreError::Format(e.to_string()))?;

    let plaintext = client
        .decrypt(&ciphertext, &resource.hash, &resource.conditions, delegation)
        .await?;
    Ok(plaintext)
}

/// Decrypt the symmetric segment of a stored resource with the exported
/// key, without touching the network.
pub fn open_local(resource: &StoredResource, key: &SymmetricKey) -> Result<Vec<u8>> {
    let (symmetric_segment, _) = codec::decode(&resource.encoded, true)?;
    let envelope = SymmetricEnvelope::from_hex(symmetric_segment)?;
    Ok(envelope.open(key)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidelock_conditions::{balance, CosmosChain, ReturnValueTest};

    fn resource_with(encoded: &str) -> StoredResource {
        StoredResource {
            encoded: encoded.to_string(),
            hash: "00".repeat(32),
            conditions: vec![balance(
                ReturnValueTest::new(">=", "1"),
                CosmosChain::CheqdTestnet,
                None,
            )],
        }
    }

    #[test]
    fn test_stored_resource_json_roundtrip() {
        let resource = resource_with("aa-bb");
        let bytes = resource.to_bytes().unwrap();
        let recovered = StoredResource::from_bytes(&bytes).unwrap();
        assert_eq!(recovered, resource);
    }

    #[test]
    fn test_stored_resource_rejects_malformed_json() {
        assert!(matches!(
            StoredResource::from_bytes(b"not json"),
            Err(Error::Core(CoreError::Format(_)))
        ));
    }

    #[test]
    fn test_open_local_roundtrip() {
        let sealed = SymmetricEnvelope::seal(b"offline secret").unwrap();
        let encoded = codec::encode(&sealed.envelope.to_hex(), "00ff").unwrap();
        let resource = resource_with(&encoded);

        let plaintext = open_local(&resource, &sealed.key).unwrap();
        assert_eq!(plaintext, b"offline secret");
    }

    #[test]
    fn test_open_local_rejects_malformed_encoding() {
        let resource = resource_with("nodash");
        let key = SymmetricKey::generate();
        assert!(matches!(
            open_local(&resource, &key),
            Err(Error::Core(CoreError::Format(_)))
        ));
    }
}
