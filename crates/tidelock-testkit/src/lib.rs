//! # Tidelock Testkit
//!
//! Test doubles and utilities for exercising the full conditional-
//! decryption flow without a real node set, wallet, or ledger:
//!
//! - [`StubNetwork`] / [`StubTransport`] — in-process threshold network
//!   with quorum behavior, delegation use-counting, and a condition switch
//! - [`StubLedger`] — capacity-credit mint/delegation double
//! - [`StubSigner`] / [`SoftwareSigner`] — deterministic identity provers
//! - [`TestHarness`] — everything wired to a ready client
//! - Golden sign-doc vectors and proptest generators

pub mod fixtures;
pub mod generators;
pub mod ledger;
pub mod network;
pub mod signer;
pub mod vectors;

pub use fixtures::{sample_inverse_timelock, StaticResolver, TestHarness};
pub use ledger::StubLedger;
pub use network::{PassthroughCombiner, StubNetwork, StubTransport};
pub use signer::{SoftwareSigner, StubSigner, STUB_ADDRESS};
pub use vectors::{signdoc_vectors, verify_signdoc_vectors, SignDocVector};
