//! Redis blob store
//!
//! Shared store for multi-instance deployments. NX-writes map to
//! `SET name value NX PX ttl`, which Redis executes atomically, so exactly
//! one racing writer observes `OK`.
//!
//! ## Example
//!
//! ```ignore
//! use authkeys_providers::blob_store::RedisBlobStore;
//!
//! let store = RedisBlobStore::new("redis://localhost:6379")?.with_namespace("authkeys");
//! ```

use async_trait::async_trait;
use authkeys_domain::error::{Error, Result};
use authkeys_domain::ports::providers::BlobStore;
use redis::{Client, aio::MultiplexedConnection};
use std::sync::Arc;
use std::time::Duration;

/// Redis blob store provider
///
/// Uses multiplexed connections for efficient connection reuse.
#[derive(Clone)]
pub struct RedisBlobStore {
    client: Client,
    namespace: Option<String>,
}

impl RedisBlobStore {
    /// Create a new Redis blob store from a connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// No connection is made until the first operation.
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string)
            .map_err(|e| Error::storage_with_source("Failed to create Redis client", e))?;

        Ok(Self {
            client,
            namespace: None,
        })
    }

    /// Prefix every blob name with `namespace:`
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    fn key(&self, name: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{name}"),
            None => name.to_string(),
        }
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::storage_with_source("Failed to get Redis connection", e))
    }
}

fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl BlobStore for RedisBlobStore {
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.get_connection().await?;

        let value: Option<Vec<u8>> = redis::cmd("GET")
            .arg(self.key(name))
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::storage_with_source("Redis GET failed", e))?;
        Ok(value)
    }

    async fn write_nx(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        // Nil reply means the key already held a value
        let reply: Option<String> = redis::cmd("SET")
            .arg(self.key(name))
            .arg(blob)
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::storage_with_source("Redis SET NX failed", e))?;
        Ok(reply.is_some())
    }

    async fn write(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<()> {
        let mut conn = self.get_connection().await?;

        let _: () = redis::cmd("SET")
            .arg(self.key(name))
            .arg(blob)
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::storage_with_source("Redis SET failed", e))?;
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBlobStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use authkeys_application::ports::registry::{
    BLOB_STORE_PROVIDERS, BlobStoreProviderConfig, BlobStoreProviderEntry,
};

#[linkme::distributed_slice(BLOB_STORE_PROVIDERS)]
static REDIS_PROVIDER: BlobStoreProviderEntry = BlobStoreProviderEntry {
    name: "redis",
    description: "Redis shared blob store (SET NX PX)",
    factory: |config: &BlobStoreProviderConfig| {
        let uri = config
            .uri
            .as_deref()
            .ok_or_else(|| "Redis blob store requires a uri".to_string())?;
        let mut store = RedisBlobStore::new(uri).map_err(|e| e.to_string())?;
        if let Some(namespace) = &config.namespace {
            store = store.with_namespace(namespace.clone());
        }
        Ok(Arc::new(store))
    },
};
