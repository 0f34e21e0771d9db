//! # Tidelock Conditions
//!
//! Declarative access-control conditions over Cosmos ledger state, and the
//! pure builders for the three supported condition families:
//!
//! - [`builder::balance`] — account-balance threshold
//! - [`builder::transaction_memo`] — transfer-event match
//! - [`builder::inverse_timelock`] — payment-window gate
//!
//! Conditions are immutable value objects serialized as camelCase JSON; the
//! network evaluates them per node and requires quorum agreement before
//! releasing key shares.

pub mod builder;
pub mod chain;
pub mod condition;

pub use builder::{balance, inverse_timelock, transaction_memo, LATEST_BLOCK_HEIGHT};
pub use chain::{CosmosChain, UnknownChain};
pub use condition::{
    AccessControlCondition, ReturnValueTest, COSMOS_CONDITION_TYPE, USER_ADDRESS_PLACEHOLDER,
};
