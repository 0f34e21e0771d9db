//! Symmetric envelope: local AEAD encryption of a payload.
//!
//! The envelope layout is `nonce || ciphertext` where the ciphertext carries
//! the AES-GCM authentication tag. The key is returned to the caller and is
//! never held or persisted by this crate.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};

use crate::crypto::{sha256_hex, EnvelopeNonce, SymmetricKey};
use crate::error::{CoreError, Result};

/// Length of the nonce prefix in a serialized envelope.
pub const NONCE_LEN: usize = 12;

/// A sealed symmetric envelope: `nonce || ciphertext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetricEnvelope {
    bytes: Vec<u8>,
}

/// Output of [`SymmetricEnvelope::seal`].
pub struct Sealed {
    /// The envelope bytes.
    pub envelope: SymmetricEnvelope,
    /// The raw exported key material.
    pub key: SymmetricKey,
    /// SHA-256 hex digest of the plaintext.
    pub content_hash: String,
}

impl SymmetricEnvelope {
    /// Encrypt `plaintext` under a freshly generated key and nonce.
    pub fn seal(plaintext: &[u8]) -> Result<Sealed> {
        let key = SymmetricKey::generate();
        let envelope = Self::seal_with_key(plaintext, &key)?;
        let content_hash = sha256_hex(plaintext);
        Ok(Sealed {
            envelope,
            key,
            content_hash,
        })
    }

    /// Encrypt `plaintext` under a caller-supplied key with a fresh nonce.
    pub fn seal_with_key(plaintext: &[u8], key: &SymmetricKey) -> Result<Self> {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CoreError::Encryption(e.to_string()))?;

        let nonce = EnvelopeNonce::generate();
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(nonce.as_bytes()), plaintext)
            .map_err(|e| CoreError::Encryption(e.to_string()))?;

        let mut bytes = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        bytes.extend_from_slice(nonce.as_bytes());
        bytes.extend_from_slice(&ciphertext);
        Ok(Self { bytes })
    }

    /// Decrypt the envelope with the given key.
    ///
    /// Fails with [`CoreError::Integrity`] when the authentication tag does
    /// not verify (wrong key or tampered bytes).
    pub fn open(&self, key: &SymmetricKey) -> Result<Vec<u8>> {
        if self.bytes.len() <= NONCE_LEN {
            return Err(CoreError::Format("envelope too short".into()));
        }

        let (nonce, ciphertext) = self.bytes.split_at(NONCE_LEN);
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CoreError::Encryption(e.to_string()))?;

        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CoreError::Integrity)
    }

    /// Create from raw envelope bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Get the raw envelope bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex encoding used for the hybrid wire format.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Parse from the hybrid wire format's hex segment.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| CoreError::Format(e.to_string()))?;
        Ok(Self { bytes })
    }
}
