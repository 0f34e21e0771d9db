//! Error types for authentication-signature construction.

use thiserror::Error;

/// Errors that can occur while producing an auth signature.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity prover exposed no accounts.
    #[error("wallet returned no accounts")]
    NoAccounts,

    /// The identity prover declined or failed to sign.
    #[error("signer rejected the request: {0}")]
    SignerRejected(String),

    /// The sign document could not be canonically encoded.
    #[error("canonical encoding failed: {0}")]
    Canonical(#[from] tidelock_core::CoreError),
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;
