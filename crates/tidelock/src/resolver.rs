//! Resource resolution seam.
//!
//! Stored resources live behind an external HTTP resolver; this crate only
//! consumes the interface. The testkit provides an in-memory
//! implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::hybrid::StoredResource;

/// Fetches stored resources by collection identifier and resource id.
#[async_trait]
pub trait ResourceResolver: Send + Sync {
    /// Fetch `{encoded, hash, conditions}` for one resource.
    async fn fetch(&self, identifier: &str, resource_id: &str) -> Result<StoredResource>;
}
