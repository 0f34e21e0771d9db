//! Transaction nonce generation.

use chrono::{SecondsFormat, Utc};
use rand::RngCore;
use uuid::Uuid;

/// Default byte length for entropy-format nonces.
pub const DEFAULT_ENTROPY_LENGTH: usize = 64;

/// Selector for the nonce representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxNonceFormat {
    /// Hex encoding of random bytes.
    Entropy,
    /// Random UUID v4 string.
    #[default]
    Uuid,
    /// Current time as an ISO-8601 string.
    Timestamp,
}

/// Generate a transaction nonce in the requested format.
pub fn tx_nonce(format: TxNonceFormat) -> String {
    match format {
        TxNonceFormat::Entropy => entropy_nonce(DEFAULT_ENTROPY_LENGTH),
        TxNonceFormat::Uuid => Uuid::new_v4().to_string(),
        TxNonceFormat::Timestamp => Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Hex encoding of `length` random bytes.
pub fn entropy_nonce(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
