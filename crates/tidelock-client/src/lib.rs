//! # Tidelock Client
//!
//! Stateful session wrapper around the threshold-decryption network:
//!
//! - [`ThresholdClient`] — connect, threshold-encrypt, and condition-gated
//!   decrypt (direct or via a pre-registered authorization script)
//! - [`transport`] — one wire interface, two implementations selected by
//!   the explicit [`RuntimeEnvironment`] flag
//! - [`CapacityAuthority`] — mint and delegate the rate-limiting credits
//!   that gate network usage
//! - [`SessionSignature`] — ephemeral, scoped, time-bounded authentication
//!
//! The client performs no retries, owns no timeouts, and never persists key
//! material; callers detect a transport failure and construct a new
//! instance.

pub mod capacity;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use capacity::{
    CapacityAuthority, DelegationAuthorization, DelegationGrant, LedgerClient, LedgerError,
    MintParams, MintedCredit,
};
pub use client::{
    ActionBinding, DecryptionShare, ShareCombiner, ThresholdClient, ThresholdSealed,
};
pub use config::{ClientOptions, LitNetwork, RuntimeEnvironment, UnknownNetwork};
pub use error::{ClientError, Result};
pub use session::{
    ResourceAbility, SessionAbility, SessionSignature, SESSION_TTL_HOURS, WILDCARD_RESOURCE,
};
pub use transport::{
    ActionSessionRequest, DecryptRequest, DenialCode, EncryptReply, EncryptRequest,
    HandshakeReply, HttpTransport, NodeReply, NodeTransport, RelayTransport,
};
