//! Identity-proving capability.
//!
//! Wallet key management and signing internals live outside this workspace;
//! the client only needs an injected capability that can enumerate accounts
//! and sign a canonical document. Invoked lazily during decryption when no
//! cached session signature exists.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::signdoc::SignDoc;

/// One account exposed by a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    /// Bech32 address.
    pub address: String,
    /// Base64-encoded public key.
    pub pubkey: String,
    /// Signing algorithm tag, e.g. `secp256k1`.
    pub algo: String,
}

/// Capability to prove caller identity by signing canonical documents.
#[async_trait]
pub trait IdentityProver: Send + Sync {
    /// Accounts controlled by this prover, primary account first.
    async fn accounts(&self) -> Result<Vec<WalletAccount>>;

    /// Sign the canonical encoding of `doc` with the key behind `address`.
    ///
    /// Returns the raw signature bytes.
    async fn sign_document(&self, address: &str, doc: &SignDoc) -> Result<Vec<u8>>;
}
