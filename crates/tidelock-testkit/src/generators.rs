//! Proptest generators for property-based testing.

use proptest::prelude::*;

use tidelock_conditions::{
    balance, inverse_timelock, transaction_memo, AccessControlCondition, CosmosChain,
    ReturnValueTest,
};

/// Generate arbitrary plaintext bytes up to `max_len`.
pub fn plaintext(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a non-empty, delimiter-free hex segment.
pub fn hex_segment() -> impl Strategy<Value = String> {
    "[0-9a-f]{2,128}".prop_map(String::from)
}

/// Generate a chain selector.
pub fn chain() -> impl Strategy<Value = CosmosChain> {
    prop_oneof![
        Just(CosmosChain::Cosmos),
        Just(CosmosChain::CheqdMainnet),
        Just(CosmosChain::CheqdTestnet),
    ]
}

/// Generate a comparator the network understands.
pub fn comparator() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("=".to_string()),
        Just(">".to_string()),
        Just(">=".to_string()),
        Just("<".to_string()),
        Just("<=".to_string()),
    ]
}

/// Generate a return-value test.
pub fn return_value_test() -> impl Strategy<Value = ReturnValueTest> {
    (comparator(), "[0-9]{1,12}").prop_map(|(comparator, value)| ReturnValueTest {
        key: None,
        comparator,
        value,
    })
}

/// Generate a bech32-looking address.
pub fn address() -> impl Strategy<Value = String> {
    "(cosmos|cheqd)1[a-z0-9]{20,38}".prop_map(String::from)
}

/// Generate a denominated amount string.
pub fn amount() -> impl Strategy<Value = String> {
    "[1-9][0-9]{0,8}(ncheq|uatom)".prop_map(String::from)
}

/// Generate a condition from any of the three builder families.
pub fn condition() -> impl Strategy<Value = AccessControlCondition> {
    prop_oneof![
        (return_value_test(), chain()).prop_map(|(test, chain)| balance(test, chain, None)),
        (return_value_test(), amount(), address(), chain())
            .prop_map(|(test, amount, sender, chain)| transaction_memo(
                test, &amount, &sender, None, chain
            )),
        (return_value_test(), amount(), chain()).prop_map(|(test, amount, chain)| {
            inverse_timelock(test, &amount, None, None, chain)
        }),
    ]
}
