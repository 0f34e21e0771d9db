//! Error types for Tidelock core primitives.

use thiserror::Error;

/// Core errors for envelope, codec, and canonicalization operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed wire encoding (bad hex, missing delimiter, empty segment).
    #[error("malformed wire encoding: {0}")]
    Format(String),

    /// AEAD authentication tag verification failed (wrong key or tampered bytes).
    #[error("integrity check failed: authentication tag mismatch")]
    Integrity,

    /// Symmetric encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Value cannot be represented in canonical JSON.
    #[error("canonical encoding error: {0}")]
    Canonical(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
