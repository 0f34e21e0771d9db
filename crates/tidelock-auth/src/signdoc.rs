//! Canonical authentication sign documents.
//!
//! The network's nodes search the signed data for a fixed challenge string
//! and independently recompute the document digest, so both the challenge
//! literal and the canonical field ordering must be byte-stable.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use tidelock_core::{canonical_json, sha256_hex};

use crate::error::Result;

/// Protocol-mandated challenge literal. Nodes match this string verbatim;
/// it must never be altered, including the embedded timestamp.
pub const AUTH_CHALLENGE: &str =
    "I am creating an account to use Lit Protocol at 2023-02-21T16:40:15.305Z";

/// Amino message type tag for arbitrary-data signing.
pub const MSG_SIGN_DATA_TYPE: &str = "sign/MsgSignData";

/// Fee block of a sign document. Always zero for authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

/// A denominated amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub amount: String,
    pub denom: String,
}

/// Payload of a [`MSG_SIGN_DATA_TYPE`] message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSignData {
    /// Base64-encoded signed data.
    pub data: String,
    /// Signer address.
    pub signer: String,
}

/// One message entry in a sign document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub value: MsgSignData,
}

/// An Amino-style sign document with fixed zero/empty transaction fields.
///
/// Field names match the Cosmos JSON encoding; canonical serialization
/// sorts them alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDoc {
    pub account_number: String,
    pub chain_id: String,
    pub fee: StdFee,
    pub memo: String,
    pub msgs: Vec<SignMessage>,
    pub sequence: String,
}

impl SignDoc {
    /// Build the authentication sign document for `address`, carrying the
    /// fixed challenge literal as its single message.
    pub fn for_challenge(address: &str) -> Self {
        Self {
            account_number: "0".to_string(),
            chain_id: String::new(),
            fee: StdFee {
                amount: Vec::new(),
                gas: "0".to_string(),
            },
            memo: String::new(),
            msgs: vec![SignMessage {
                msg_type: MSG_SIGN_DATA_TYPE.to_string(),
                value: MsgSignData {
                    data: BASE64.encode(AUTH_CHALLENGE),
                    signer: address.to_string(),
                },
            }],
            sequence: "0".to_string(),
        }
    }

    /// Canonical JSON bytes of this document.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        Ok(canonical_json(self)?)
    }

    /// Hex-encoded SHA-256 digest of the canonical encoding.
    pub fn digest_hex(&self) -> Result<String> {
        Ok(sha256_hex(&self.canonical_bytes()?))
    }
}
