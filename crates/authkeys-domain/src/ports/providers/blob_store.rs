//! Blob Store Provider Port
//!
//! Port for the shared key/value store that is the only coordination medium
//! between processes. Implementations include in-memory (Moka), distributed
//! (Redis), SQL (PostgreSQL), and the encrypting decorator.
//!
//! ## Consistency contract
//!
//! `write_nx` must be atomic and linearizable per name: when two callers race
//! on the same name exactly one observes `true`, and a `read` issued after a
//! `false` result must observe the winner's value. Eventually-consistent
//! stores do not meet this contract.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Blob Store Provider Port
///
/// # Example
///
/// ```ignore
/// use authkeys_domain::ports::providers::BlobStore;
///
/// if store.write_nx("rsa:42", &pem, ttl).await? {
///     // our value is now authoritative for this name
/// } else {
///     let winner = store.read("rsa:42").await?;
/// }
/// ```
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Read the live value stored under `name`
    ///
    /// # Returns
    /// `None` if nothing is stored or the value's TTL has elapsed
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Create `name` with `blob` only if it holds no live value
    ///
    /// # Returns
    /// True iff this call's value became the stored value; false if an
    /// existing value was left untouched
    async fn write_nx(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<bool>;

    /// Store `blob` under `name`, replacing any existing value
    async fn write(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<()>;

    /// Get the name/identifier of this provider implementation
    ///
    /// # Returns
    /// A string identifier for the provider (e.g., "memory", "redis", "postgres")
    fn provider_name(&self) -> &str;
}
