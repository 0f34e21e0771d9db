//! Session signatures: ephemeral, scoped authentication for one client
//! session.
//!
//! A session signature binds an auth signature to a set of resource/ability
//! requests and an expiration. It is produced once per session and reused
//! until expiry; a delegation authorization rides along as a capability
//! proof when supplied.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tidelock_auth::AuthSignature;

use crate::capacity::DelegationAuthorization;

/// Wildcard resource identifier: any resource of the requested kind.
pub const WILDCARD_RESOURCE: &str = "*";

/// Session lifetime.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Abilities a session signature can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAbility {
    #[serde(rename = "access-control-condition-decryption")]
    AccessControlConditionDecryption,
    #[serde(rename = "access-control-condition-signing")]
    AccessControlConditionSigning,
    #[serde(rename = "lit-action-execution")]
    ActionExecution,
}

/// One resource/ability pair a session is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAbility {
    pub resource: String,
    pub ability: SessionAbility,
}

/// An ephemeral, resource- and ability-scoped, time-bounded signature
/// proving caller identity for one client session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSignature {
    pub resource_ability_requests: Vec<ResourceAbility>,
    /// Capability proofs forwarded to the network (delegated credits).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<DelegationAuthorization>,
    pub issued_at: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
    pub auth_sig: AuthSignature,
}

impl SessionSignature {
    /// Session scoped to condition-gated decryption over the wildcard
    /// resource.
    pub fn for_decryption(
        auth_sig: AuthSignature,
        delegation: Option<DelegationAuthorization>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            resource_ability_requests: vec![ResourceAbility {
                resource: WILDCARD_RESOURCE.to_string(),
                ability: SessionAbility::AccessControlConditionDecryption,
            }],
            capabilities: delegation.into_iter().collect(),
            issued_at: now,
            expiration: now + Duration::hours(SESSION_TTL_HOURS),
            auth_sig,
        }
    }

    /// Whether the session has expired as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration
    }

    /// Whether this session carries exactly the given capability proof.
    ///
    /// Compared by signature so a session cached for one delegation is not
    /// reused for another.
    pub fn carries(&self, delegation: Option<&DelegationAuthorization>) -> bool {
        match (self.capabilities.as_slice(), delegation) {
            ([], None) => true,
            ([held], Some(given)) => held.signature.sig == given.signature.sig,
            _ => false,
        }
    }
}
