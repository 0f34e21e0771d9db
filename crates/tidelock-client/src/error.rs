//! Error types for the threshold-network client.

use thiserror::Error;
use tidelock_auth::AuthError;
use tidelock_core::CoreError;

/// Errors that can occur during client operations.
///
/// Every failure is surfaced as one of these discriminants; the client
/// performs no silent recovery and no internal retries.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid network or chain selection at construction.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// No transport implementation applies to the configured environment.
    #[error("unsupported execution environment: {0}")]
    UnsupportedEnvironment(String),

    /// Operation requires a completed `connect()`.
    #[error("client is not connected")]
    NotConnected,

    /// Connectivity failure at the transport boundary.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Network-side encryption failed (transport or validation).
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Condition quorum not reached, or delegated credit exhausted/expired.
    #[error("condition not met: {0}")]
    ConditionNotMet(String),

    /// Signature invalid, expired, or out of scope.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Invalid delegation request.
    #[error("delegation failed: {0}")]
    Delegation(String),

    /// Core primitive failure (format, integrity, canonicalization).
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl From<AuthError> for ClientError {
    fn from(e: AuthError) -> Self {
        ClientError::Auth(e.to_string())
    }
}

impl From<tidelock_conditions::UnknownChain> for ClientError {
    fn from(e: tidelock_conditions::UnknownChain) -> Self {
        ClientError::Configuration(e.to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
