//! Capacity credits: rate-limiting tokens gating network usage.
//!
//! Credits are minted on-chain through an external ledger collaborator and
//! delegated to other identities via a signed, use-bounded grant. The
//! authority keeps no local ledger of remaining uses; exhaustion surfaces
//! as a condition failure from the network on a later decrypt.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tidelock_auth::AuthSignature;
use tracing::{info, warn};

use crate::error::{ClientError, Result};

/// Parameters for minting a capacity credit.
///
/// At most one rate-limit dimension is expected to be meaningful per mint;
/// combining several is accepted but their joint enforcement is up to the
/// network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintParams {
    /// Days until the credit expires, counted from mint time.
    pub effective_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_per_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_per_second: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_per_kilosecond: Option<u32>,
}

impl MintParams {
    /// Mint parameters with only an expiry window.
    pub fn effective_days(days: u32) -> Self {
        Self {
            effective_days: days,
            requests_per_day: None,
            requests_per_second: None,
            requests_per_kilosecond: None,
        }
    }

    /// Set the per-day rate limit.
    pub fn requests_per_day(mut self, requests: u32) -> Self {
        self.requests_per_day = Some(requests);
        self
    }

    fn rate_dimension_count(&self) -> usize {
        [
            self.requests_per_day.is_some(),
            self.requests_per_second.is_some(),
            self.requests_per_kilosecond.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// A freshly minted capacity credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintedCredit {
    /// On-chain token identifier.
    pub token_id: String,
    /// Hash of the mint transaction.
    pub tx_hash: String,
}

/// An unsigned delegation grant, submitted to the ledger for signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationGrant {
    pub token_id: String,
    pub delegatee_addresses: Vec<String>,
    pub uses: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
}

/// A signed grant transferring bounded use of a capacity credit.
///
/// The signature is an opaque capability token; this crate never verifies
/// it and never tracks remaining uses locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationAuthorization {
    pub token_id: String,
    pub delegatee_addresses: Vec<String>,
    pub uses: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    pub signature: AuthSignature,
}

/// Errors reported by the ledger collaborator.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The signer does not control the named token.
    #[error("token {0} is not controlled by the signer")]
    NotTokenOwner(String),

    /// Transaction submission failed.
    #[error("ledger submission failed: {0}")]
    Submission(String),
}

/// External ledger transaction layer.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submit a credit-creation transaction.
    async fn submit_mint(&self, params: &MintParams)
        -> std::result::Result<MintedCredit, LedgerError>;

    /// Sign a delegation grant with the credit holder's key.
    async fn submit_delegation(
        &self,
        grant: &DelegationGrant,
    ) -> std::result::Result<AuthSignature, LedgerError>;
}

/// Mints and delegates capacity credits through a ledger collaborator.
pub struct CapacityAuthority<L: LedgerClient> {
    ledger: L,
}

impl<L: LedgerClient> CapacityAuthority<L> {
    /// Create an authority backed by the given ledger collaborator.
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// Mint a new capacity credit.
    pub async fn mint(&self, params: MintParams) -> Result<MintedCredit> {
        if params.rate_dimension_count() > 1 {
            warn!(
                dimensions = params.rate_dimension_count(),
                "minting credit with multiple rate-limit dimensions; joint enforcement is network-defined"
            );
        }

        let minted = self
            .ledger
            .submit_mint(&params)
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        info!(
            token_id = %minted.token_id,
            tx_hash = %minted.tx_hash,
            effective_days = params.effective_days,
            "minted capacity credit"
        );
        Ok(minted)
    }

    /// Produce a signed grant capping total decrypt usage at `uses` across
    /// the union of `delegatees`.
    pub async fn delegate(
        &self,
        token_id: &str,
        delegatees: &[String],
        uses: u32,
        expiration: Option<String>,
        statement: Option<String>,
    ) -> Result<DelegationAuthorization> {
        if delegatees.is_empty() {
            return Err(ClientError::Delegation(
                "delegatee set must not be empty".into(),
            ));
        }

        let grant = DelegationGrant {
            token_id: token_id.to_string(),
            delegatee_addresses: delegatees.to_vec(),
            uses,
            expiration,
            statement,
        };

        let signature = self.ledger.submit_delegation(&grant).await.map_err(|e| match e {
            LedgerError::NotTokenOwner(_) => ClientError::Delegation(e.to_string()),
            LedgerError::Submission(msg) => ClientError::Transport(msg),
        })?;

        info!(
            token_id = %grant.token_id,
            delegatees = grant.delegatee_addresses.len(),
            uses = grant.uses,
            "delegated capacity credit"
        );

        Ok(DelegationAuthorization {
            token_id: grant.token_id,
            delegatee_addresses: grant.delegatee_addresses,
            uses: grant.uses,
            expiration: grant.expiration,
            statement: grant.statement,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FakeLedger {
        next_token: AtomicU32,
    }

    impl FakeLedger {
        fn new() -> Self {
            Self {
                next_token: AtomicU32::new(1),
            }
        }
    }

    #[async_trait]
    impl LedgerClient for FakeLedger {
        async fn submit_mint(
            &self,
            _params: &MintParams,
        ) -> std::result::Result<MintedCredit, LedgerError> {
            let id = self.next_token.fetch_add(1, Ordering::SeqCst);
            Ok(MintedCredit {
                token_id: id.to_string(),
                tx_hash: format!("0x{id:064x}"),
            })
        }

        async fn submit_delegation(
            &self,
            grant: &DelegationGrant,
        ) -> std::result::Result<AuthSignature, LedgerError> {
            if grant.token_id == "unowned" {
                return Err(LedgerError::NotTokenOwner(grant.token_id.clone()));
            }
            Ok(AuthSignature {
                sig: "ZmFrZQ==".to_string(),
                derived_via: tidelock_auth::DERIVED_VIA.to_string(),
                signed_message: "00".repeat(32),
                address: "cheqd1owner".to_string(),
                algo: "secp256k1".to_string(),
                pub_key: "cGs=".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_mint_returns_token() {
        let authority = CapacityAuthority::new(FakeLedger::new());
        let minted = authority
            .mint(MintParams::effective_days(1).requests_per_day(10))
            .await
            .unwrap();
        assert_eq!(minted.token_id, "1");
    }

    #[tokio::test]
    async fn test_delegate_empty_delegatees_fails() {
        let authority = CapacityAuthority::new(FakeLedger::new());
        let err = authority
            .delegate("1", &[], 5, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Delegation(_)));
    }

    #[tokio::test]
    async fn test_delegate_unowned_token_fails() {
        let authority = CapacityAuthority::new(FakeLedger::new());
        let err = authority
            .delegate("unowned", &["cheqd1x".to_string()], 5, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Delegation(_)));
    }

    #[tokio::test]
    async fn test_delegate_produces_scoped_grant() {
        let authority = CapacityAuthority::new(FakeLedger::new());
        let delegation = authority
            .delegate(
                "7",
                &["cheqd1a".to_string(), "cheqd1b".to_string()],
                3,
                Some("2030-01-01T00:00:00Z".to_string()),
                None,
            )
            .await
            .unwrap();
        assert_eq!(delegation.token_id, "7");
        assert_eq!(delegation.delegatee_addresses.len(), 2);
        assert_eq!(delegation.uses, 3);
        assert_eq!(
            delegation.expiration.as_deref(),
            Some("2030-01-01T00:00:00Z")
        );
    }
}
