//! Top-level error type for the unified API.

use thiserror::Error;
use tidelock_auth::AuthError;
use tidelock_client::ClientError;
use tidelock_core::CoreError;

/// Errors surfaced by the hybrid seal/open flow.
#[derive(Debug, Error)]
pub enum Error {
    /// Core primitive failure (format, integrity, canonicalization).
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Authentication-signature failure.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Threshold-client failure.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// Resource resolution failure.
    #[error("resource resolution failed: {0}")]
    Resolver(String),
}

/// Result type for the unified API.
pub type Result<T> = std::result::Result<T, Error>;
