//! End-to-end tests for the conditional-decryption flow, driven against
//! the in-process network double from the testkit.

use std::sync::Arc;
use tidelock::client::{ActionBinding, ClientError};
use tidelock::{hybrid, ClientOptions, MintParams, RuntimeEnvironment, ThresholdClient};
use tidelock_testkit::{
    sample_inverse_timelock, PassthroughCombiner, StubSigner, TestHarness,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn hybrid_seal_open_roundtrip() {
    init_tracing();
    let harness = TestHarness::new();
    harness.client.connect().await.unwrap();

    let conditions = vec![sample_inverse_timelock()];
    let (resource, key) = hybrid::seal(b"Hello World", &conditions, &harness.client)
        .await
        .unwrap();

    // Stored form carries both segments and the condition set.
    assert_eq!(resource.conditions, conditions);
    assert!(resource.encoded.contains('-'));

    let plaintext = hybrid::open(&resource, &harness.client, None).await.unwrap();
    assert_eq!(plaintext, "Hello World");

    // The symmetric half stays usable offline with the exported key.
    let recovered = hybrid::open_local(&resource, &key).unwrap();
    assert_eq!(recovered, b"Hello World");
}

#[tokio::test]
async fn connect_is_idempotent_and_required() {
    let harness = TestHarness::new();

    let err = harness.client.encrypt(b"x", &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::NotConnected));

    harness.client.connect().await.unwrap();
    harness.client.connect().await.unwrap();
    assert!(harness.client.is_connected().await);
}

#[tokio::test]
async fn delegated_credit_exhaustion() {
    let harness = TestHarness::new();
    harness.client.connect().await.unwrap();

    let conditions = vec![sample_inverse_timelock()];
    let (resource, _key) = hybrid::seal(b"metered secret", &conditions, &harness.client)
        .await
        .unwrap();

    // Mint a one-day credit and delegate a single use.
    let minted = harness
        .authority
        .mint(MintParams::effective_days(1).requests_per_day(10))
        .await
        .unwrap();
    let delegation = harness
        .authority
        .delegate(
            &minted.token_id,
            &["cheqd1rnr5jrt4exl0samwj0yegv99jeskl0hsxmcz96".to_string()],
            1,
            None,
            None,
        )
        .await
        .unwrap();

    // First decrypt consumes the only use.
    let plaintext = hybrid::open(&resource, &harness.client, Some(&delegation))
        .await
        .unwrap();
    assert_eq!(plaintext, "metered secret");
    assert_eq!(
        harness.network.remaining_uses(&delegation.signature.sig),
        Some(0)
    );

    // Second decrypt with the same signature is declined.
    let err = hybrid::open(&resource, &harness.client, Some(&delegation))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        tidelock::Error::Client(ClientError::ConditionNotMet(_))
    ));
}

#[tokio::test]
async fn failed_conditions_block_decryption() {
    let harness = TestHarness::new();
    harness.client.connect().await.unwrap();

    let conditions = vec![sample_inverse_timelock()];
    let (resource, _key) = hybrid::seal(b"gated", &conditions, &harness.client)
        .await
        .unwrap();

    harness.network.set_conditions_satisfied(false);
    let err = hybrid::open(&resource, &harness.client, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        tidelock::Error::Client(ClientError::ConditionNotMet(_))
    ));

    // Once the predicate flips back, the same resource opens.
    harness.network.set_conditions_satisfied(true);
    let plaintext = hybrid::open(&resource, &harness.client, None).await.unwrap();
    assert_eq!(plaintext, "gated");
}

#[tokio::test]
async fn tampered_content_hash_is_rejected() {
    let harness = TestHarness::new();
    harness.client.connect().await.unwrap();

    let (mut resource, _key) = hybrid::seal(b"bound", &[], &harness.client).await.unwrap();
    resource.hash = "00".repeat(32);

    let err = hybrid::open(&resource, &harness.client, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        tidelock::Error::Client(ClientError::ConditionNotMet(_))
    ));
}

#[tokio::test]
async fn session_signature_cached_across_decrypts() {
    let harness = TestHarness::new();
    harness.client.connect().await.unwrap();

    let (resource, _key) = hybrid::seal(b"cached", &[], &harness.client).await.unwrap();

    hybrid::open(&resource, &harness.client, None).await.unwrap();
    hybrid::open(&resource, &harness.client, None).await.unwrap();

    // The prover signed the direct auth challenge exactly once; the second
    // decrypt reused the cached session.
    assert_eq!(harness.signer.signed_documents().len(), 1);
}

#[tokio::test]
async fn decrypt_via_action_session() {
    let harness = TestHarness::new();
    harness.client.connect().await.unwrap();

    let (resource, _key) = hybrid::seal(b"scripted", &[], &harness.client).await.unwrap();
    let (_, threshold_segment) =
        tidelock::core::codec::decode(&resource.encoded, true).unwrap();
    let ciphertext = hex::decode(threshold_segment).unwrap();

    let action = ActionBinding {
        code_hash: "QmYwAPJzv5CZsnAzt8auVZRn2E6JN1mbGvQ6dDiXvJvKkQ".to_string(),
        public_key: "0x04aabb".to_string(),
    };
    let plaintext = harness
        .client
        .decrypt_via_action(
            &ciphertext,
            &resource.hash,
            &resource.conditions,
            &action,
            serde_json::json!({ "payer": "cheqd1rnr5jrt4exl0samwj0yegv99jeskl0hsxmcz96" }),
            None,
        )
        .await
        .unwrap();
    assert_eq!(plaintext, "scripted");
}

#[tokio::test]
async fn unknown_environment_fails_before_connecting() {
    let options = ClientOptions::default().environment(RuntimeEnvironment::Unknown);
    let err = ThresholdClient::new(
        options,
        Arc::new(StubSigner::default()),
        Arc::new(PassthroughCombiner),
    )
    .unwrap_err();
    assert!(matches!(err, ClientError::UnsupportedEnvironment(_)));
}

#[tokio::test]
async fn canonical_signature_golden_vectors() {
    // The deterministic signer always signs the fixed challenge literal,
    // and the signed message equals the canonical document digest.
    let signer = StubSigner::default();
    let auth = tidelock::generate_auth_signature(&signer).await.unwrap();

    let vectors = tidelock_testkit::signdoc_vectors();
    let vector = vectors
        .iter()
        .find(|v| v.address == tidelock_testkit::STUB_ADDRESS)
        .unwrap();
    assert_eq!(auth.signed_message, vector.digest_hex);
    assert!(tidelock_testkit::verify_signdoc_vectors().is_empty());
}
