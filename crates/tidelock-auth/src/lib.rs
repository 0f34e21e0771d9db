//! # Tidelock Auth
//!
//! Canonical authentication-signature construction for the threshold
//! network: the fixed-challenge sign document, the [`AuthSignature`] wire
//! object, transaction nonces, and the [`IdentityProver`] capability seam
//! behind which wallet internals live.
//!
//! Network nodes independently recompute `signedMessage` as the SHA-256
//! digest of the canonical JSON sign document, so document construction
//! here is byte-stable across runs and platforms.

pub mod error;
pub mod nonce;
pub mod prover;
pub mod signature;
pub mod signdoc;

pub use error::{AuthError, Result};
pub use nonce::{entropy_nonce, tx_nonce, TxNonceFormat, DEFAULT_ENTROPY_LENGTH};
pub use prover::{IdentityProver, WalletAccount};
pub use signature::{generate_auth_signature, AuthSignature, DERIVED_VIA};
pub use signdoc::{SignDoc, AUTH_CHALLENGE, MSG_SIGN_DATA_TYPE};
