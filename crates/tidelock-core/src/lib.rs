//! # Tidelock Core
//!
//! Core primitives for the Tidelock system: the local symmetric envelope,
//! the hybrid wire codec, canonical JSON encoding, and the digest and key
//! types shared across the workspace.
//!
//! ## Hybrid ciphertexts
//!
//! A payload is encrypted twice: once locally (AES-256-GCM envelope, key
//! kept by the caller) and once by the threshold network. The two opaque
//! ciphertexts are stored as a single delimited string:
//!
//! ```text
//! <hex(nonce || aead ciphertext)>-<hex(network ciphertext)>
//! ```
//!
//! [`codec::encode`] and [`codec::decode`] are lossless for any pair of
//! non-empty, delimiter-free segments; both segments are hex in practice.
//!
//! ## Canonical JSON
//!
//! Authentication sign documents are digested independently by network
//! nodes, so [`canonical::canonical_json`] produces byte-stable output:
//! sorted object keys, no whitespace, no floats.

pub mod canonical;
pub mod codec;
pub mod crypto;
pub mod envelope;
pub mod error;

pub use canonical::canonical_json;
pub use crypto::{sha256_hex, EnvelopeNonce, Sha256Digest, SymmetricKey};
pub use envelope::{Sealed, SymmetricEnvelope, NONCE_LEN};
pub use error::{CoreError, Result};
