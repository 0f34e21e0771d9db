//! Auth signature construction.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};
use crate::prover::IdentityProver;
use crate::signdoc::SignDoc;

/// Fixed derivation tag the network expects for Cosmos wallet signatures.
pub const DERIVED_VIA: &str = "cosmos.signArbitrary";

/// A wallet-produced signature over the canonical challenge document.
///
/// Ephemeral: generated per authentication event and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSignature {
    /// Base64-encoded raw signature.
    pub sig: String,
    /// Always [`DERIVED_VIA`].
    pub derived_via: String,
    /// Hex SHA-256 digest of the canonical sign document.
    pub signed_message: String,
    /// Signer's bech32 address.
    pub address: String,
    /// Signing algorithm tag.
    pub algo: String,
    /// Base64-encoded public key.
    pub pub_key: String,
}

/// Build the canonical challenge document for the prover's primary account,
/// have the prover sign it, and assemble the auth signature.
pub async fn generate_auth_signature(prover: &dyn IdentityProver) -> Result<AuthSignature> {
    let accounts = prover.accounts().await?;
    let account = accounts.first().ok_or(AuthError::NoAccounts)?;

    let doc = SignDoc::for_challenge(&account.address);
    let signature = prover.sign_document(&account.address, &doc).await?;

    Ok(AuthSignature {
        sig: BASE64.encode(signature),
        derived_via: DERIVED_VIA.to_string(),
        signed_message: doc.digest_hex()?,
        address: account.address.clone(),
        algo: account.algo.clone(),
        pub_key: account.pubkey.clone(),
    })
}
