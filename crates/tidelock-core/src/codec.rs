//! Hybrid wire codec.
//!
//! A hybrid ciphertext is stored as one delimited string
//! `<symmetric segment>-<threshold segment>`. Both segments are hex in
//! practice, so the delimiter cannot occur inside them; `encode` still
//! rejects delimiter-bearing segments so the invariant holds for any input.

use crate::error::{CoreError, Result};

/// Separator between the symmetric and threshold segments.
pub const SEGMENT_DELIMITER: char = '-';

/// Join two non-empty, delimiter-free segments into one wire string.
pub fn encode(symmetric: &str, threshold: &str) -> Result<String> {
    if symmetric.is_empty() || threshold.is_empty() {
        return Err(CoreError::Format("empty ciphertext segment".into()));
    }
    if symmetric.contains(SEGMENT_DELIMITER) || threshold.contains(SEGMENT_DELIMITER) {
        return Err(CoreError::Format(format!(
            "segment contains reserved delimiter {SEGMENT_DELIMITER:?}"
        )));
    }
    Ok(format!("{symmetric}{SEGMENT_DELIMITER}{threshold}"))
}

/// Split a wire string at the first delimiter.
///
/// With `validate` set, fails with a format error when the delimiter is
/// missing or either segment is empty. Without validation a missing
/// delimiter yields `(input, "")`.
pub fn decode(encoded: &str, validate: bool) -> Result<(&str, &str)> {
    match encoded.split_once(SEGMENT_DELIMITER) {
        Some((symmetric, threshold)) => {
            if validate && (symmetric.is_empty() || threshold.is_empty()) {
                return Err(CoreError::Format("empty ciphertext segment".into()));
            }
            Ok((symmetric, threshold))
        }
        None if validate => Err(CoreError::Format("missing segment delimiter".into())),
        None => Ok((encoded, "")),
    }
}
