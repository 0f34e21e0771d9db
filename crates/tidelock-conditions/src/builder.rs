//! Pure builders for the supported condition families.
//!
//! All builders are deterministic and side-effect free: identical inputs
//! produce byte-identical conditions across runs. The query strings are
//! parsed structurally by the network and must not be reshaped.

use crate::chain::CosmosChain;
use crate::condition::{
    AccessControlCondition, ReturnValueTest, COSMOS_CONDITION_TYPE, USER_ADDRESS_PLACEHOLDER,
};

/// Default block-height parameter for timelock evaluation.
pub const LATEST_BLOCK_HEIGHT: &str = "latest";

/// Condition on an account's bank balance.
///
/// When `address` is `None` the network substitutes the requester's
/// resolved address at evaluation time.
pub fn balance(
    test: ReturnValueTest,
    chain: CosmosChain,
    address: Option<&str>,
) -> AccessControlCondition {
    let address = address.unwrap_or(USER_ADDRESS_PLACEHOLDER);
    AccessControlCondition {
        condition_type: COSMOS_CONDITION_TYPE.to_string(),
        path: format!("/cosmos/bank/v1beta1/balances/{address}"),
        chain,
        method: None,
        parameters: None,
        return_value_test: test,
    }
}

/// Condition on a transfer transaction matching sender, recipient, and
/// amount, ordered by descending block height.
pub fn transaction_memo(
    test: ReturnValueTest,
    amount: &str,
    sender: &str,
    recipient: Option<&str>,
    chain: CosmosChain,
) -> AccessControlCondition {
    let recipient = recipient.unwrap_or(USER_ADDRESS_PLACEHOLDER);
    AccessControlCondition {
        condition_type: COSMOS_CONDITION_TYPE.to_string(),
        path: format!(
            "/cosmos/tx/v1beta1/txs?events=transfer.recipient='{recipient}'&events=transfer.sender='{sender}'&events=transfer.amount='{amount}'&order_by=2"
        ),
        chain,
        method: None,
        parameters: None,
        return_value_test: test,
    }
}

/// Inverse-timelock condition: gates decryption on whether a payment to
/// `recipient` of `amount` has occurred within the height/time window.
///
/// The polarity is carried entirely by `test.comparator`: one direction
/// permits decryption only while the payment is absent and revokes it once
/// paid, the other does the reverse.
pub fn inverse_timelock(
    test: ReturnValueTest,
    amount: &str,
    recipient: Option<&str>,
    block_height: Option<&str>,
    chain: CosmosChain,
) -> AccessControlCondition {
    let recipient = recipient.unwrap_or(USER_ADDRESS_PLACEHOLDER);
    let block_height = block_height.unwrap_or(LATEST_BLOCK_HEIGHT);
    AccessControlCondition {
        condition_type: COSMOS_CONDITION_TYPE.to_string(),
        path: format!(
            "/cosmos/tx/v1beta1/txs?events=transfer.recipient='{recipient}'&events=transfer.amount='{amount}'&order_by=2&pagination.limit=1"
        ),
        chain,
        method: Some("timelock".to_string()),
        parameters: Some(vec![block_height.to_string()]),
        return_value_test: test,
    }
}
