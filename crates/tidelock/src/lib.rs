//! # Tidelock
//!
//! Conditional, network-gated decryption of arbitrary payloads.
//!
//! A payload is encrypted once locally (symmetric AEAD envelope) and once
//! by a distributed threshold-decryption network under a declarative
//! predicate over Cosmos ledger state. Decryption succeeds only when a
//! quorum of network nodes independently verifies the predicate. Network
//! access is rate-limited by transferable, delegable capacity credits, and
//! caller identity is proven per-session via wallet signatures over a
//! canonical sign document.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tidelock::{hybrid, ClientOptions, ThresholdClient};
//! use tidelock::conditions::{inverse_timelock, CosmosChain, ReturnValueTest};
//!
//! async fn example(
//!     prover: Arc<dyn tidelock::auth::IdentityProver>,
//!     combiner: Arc<dyn tidelock::client::ShareCombiner>,
//! ) -> tidelock::Result<()> {
//!     let client = ThresholdClient::new(ClientOptions::default(), prover, combiner)?;
//!     client.connect().await?;
//!
//!     // Decryption allowed only while the payment window is open.
//!     let condition = inverse_timelock(
//!         ReturnValueTest::with_key("$.tx_responses.*.timestamp", "<=", "300"),
//!         "100ncheq",
//!         Some("cheqd1recipient"),
//!         None,
//!         CosmosChain::CheqdTestnet,
//!     );
//!
//!     let (resource, key) = hybrid::seal(b"hello", &[condition], &client).await?;
//!     let plaintext = hybrid::open(&resource, &client, None).await?;
//!     assert_eq!(plaintext, "hello");
//!
//!     // Offline recovery path with the caller-held key.
//!     let recovered = hybrid::open_local(&resource, &key)?;
//!     assert_eq!(recovered, b"hello");
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - [`core`] — symmetric envelope, hybrid codec, canonical JSON
//! - [`conditions`] — access-control-condition builders
//! - [`auth`] — canonical sign documents and auth signatures
//! - [`client`] — threshold client, transports, capacity credits

pub mod error;
pub mod hybrid;
pub mod resolver;

// Re-export component crates
pub use tidelock_auth as auth;
pub use tidelock_client as client;
pub use tidelock_conditions as conditions;
pub use tidelock_core as core;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use hybrid::StoredResource;
pub use resolver::ResourceResolver;

pub use tidelock_auth::{generate_auth_signature, AuthSignature, IdentityProver, TxNonceFormat};
pub use tidelock_client::{
    CapacityAuthority, ClientOptions, DelegationAuthorization, LitNetwork, MintParams,
    RuntimeEnvironment, ThresholdClient,
};
pub use tidelock_conditions::{AccessControlCondition, CosmosChain, ReturnValueTest};
pub use tidelock_core::{SymmetricEnvelope, SymmetricKey};
