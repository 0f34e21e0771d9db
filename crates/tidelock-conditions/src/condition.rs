//! Access-control-condition value objects.
//!
//! A condition is a declarative predicate over ledger state. The network
//! parses the `path` query structurally, so builders must preserve the
//! literal query shapes; conditions are immutable once constructed.

use serde::{Deserialize, Serialize};

use crate::chain::CosmosChain;

/// Fixed condition type tag for Cosmos-style conditions.
pub const COSMOS_CONDITION_TYPE: &str = "cosmos";

/// Placeholder substituted by the network with the requester's resolved
/// wallet address at evaluation time.
pub const USER_ADDRESS_PLACEHOLDER: &str = ":userAddress";

/// Comparison applied to the value extracted from the queried ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnValueTest {
    /// Optional JSONPath-style selector into the query response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Comparator, e.g. `>=`, `<=`, `=`.
    pub comparator: String,
    /// Right-hand operand, always a string on the wire.
    pub value: String,
}

impl ReturnValueTest {
    /// Test without a response selector.
    pub fn new(comparator: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: None,
            comparator: comparator.into(),
            value: value.into(),
        }
    }

    /// Test with a JSONPath-style selector into the query response.
    pub fn with_key(
        key: impl Into<String>,
        comparator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: Some(key.into()),
            comparator: comparator.into(),
            value: value.into(),
        }
    }
}

/// A declarative predicate over ledger state gating decryption.
///
/// A request carries an ordered set of these; the network requires them to
/// jointly evaluate true before any node releases its key share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessControlCondition {
    /// Always [`COSMOS_CONDITION_TYPE`].
    pub condition_type: String,
    /// Templated ledger query path.
    pub path: String,
    /// Chain whose state is queried.
    pub chain: CosmosChain,
    /// Optional evaluation method understood by the network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Ordered parameters for `method`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
    /// Comparison applied to the query result.
    pub return_value_test: ReturnValueTest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_json_shape() {
        let condition = AccessControlCondition {
            condition_type: COSMOS_CONDITION_TYPE.to_string(),
            path: "/cosmos/bank/v1beta1/balances/:userAddress".to_string(),
            chain: CosmosChain::CheqdTestnet,
            method: None,
            parameters: None,
            return_value_test: ReturnValueTest::new(">=", "1000000"),
        };

        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(json["conditionType"], "cosmos");
        assert_eq!(json["chain"], "cheqdTestnet");
        assert_eq!(json["returnValueTest"]["comparator"], ">=");
        // Optional fields stay off the wire when unset.
        assert!(json.get("method").is_none());
        assert!(json.get("parameters").is_none());
        assert!(json["returnValueTest"].get("key").is_none());
    }

    #[test]
    fn test_condition_json_roundtrip() {
        let condition = AccessControlCondition {
            condition_type: COSMOS_CONDITION_TYPE.to_string(),
            path: "/cosmos/tx/v1beta1/txs?x=y".to_string(),
            chain: CosmosChain::Cosmos,
            method: Some("timelock".to_string()),
            parameters: Some(vec!["latest".to_string()]),
            return_value_test: ReturnValueTest::with_key(
                "$.tx_responses.*.timestamp",
                "<=",
                "300",
            ),
        };

        let json = serde_json::to_string(&condition).unwrap();
        let recovered: AccessControlCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, condition);
    }
}
