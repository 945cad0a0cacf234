//! Moka in-memory blob store
//!
//! Concurrent in-memory store built on Moka with a TTL per entry. NX-writes
//! go through Moka's entry API, which initializes a missing key exactly once
//! even under concurrent callers.
//!
//! Only processes sharing this value coordinate through it, so this backend
//! is for tests and single-process deployments.
//!
//! ## Example
//!
//! ```ignore
//! use authkeys_providers::blob_store::MokaBlobStore;
//!
//! let store = MokaBlobStore::with_capacity(1000);
//! ```

use crate::constants::MEMORY_BLOB_STORE_DEFAULT_CAPACITY;
use async_trait::async_trait;
use authkeys_domain::error::Result;
use authkeys_domain::ports::providers::BlobStore;
use moka::Expiry;
use moka::future::Cache;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Value plus the TTL it was written with
#[derive(Clone)]
struct StoredBlob {
    data: Arc<[u8]>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with
struct BlobExpiry;

impl Expiry<String, StoredBlob> for BlobExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredBlob,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredBlob,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based in-memory blob store
#[derive(Clone)]
pub struct MokaBlobStore {
    cache: Cache<String, StoredBlob>,
    max_size: u64,
}

impl Default for MokaBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaBlobStore {
    /// Create a new store with default capacity
    pub fn new() -> Self {
        Self::with_capacity(MEMORY_BLOB_STORE_DEFAULT_CAPACITY)
    }

    /// Create a new store holding at most `max_size` entries
    pub fn with_capacity(max_size: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_size)
            .expire_after(BlobExpiry)
            .build();

        Self { cache, max_size }
    }

    /// Get the maximum capacity of the store
    pub fn max_size(&self) -> u64 {
        self.max_size
    }
}

#[async_trait]
impl BlobStore for MokaBlobStore {
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.cache.get(name).await.map(|blob| blob.data.to_vec()))
    }

    async fn write_nx(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<bool> {
        let value = StoredBlob {
            data: Arc::from(blob),
            ttl,
        };
        let entry = self
            .cache
            .entry(name.to_string())
            .or_insert_with(async move { value })
            .await;
        Ok(entry.is_fresh())
    }

    async fn write(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<()> {
        let value = StoredBlob {
            data: Arc::from(blob),
            ttl,
        };
        self.cache.insert(name.to_string(), value).await;
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

impl std::fmt::Debug for MokaBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaBlobStore")
            .field("max_size", &self.max_size)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use authkeys_application::ports::registry::{
    BLOB_STORE_PROVIDERS, BlobStoreProviderConfig, BlobStoreProviderEntry,
};

#[linkme::distributed_slice(BLOB_STORE_PROVIDERS)]
static MEMORY_PROVIDER: BlobStoreProviderEntry = BlobStoreProviderEntry {
    name: "memory",
    description: "Moka in-memory blob store (single process only)",
    factory: |config: &BlobStoreProviderConfig| {
        let store = match config.max_size {
            Some(max_size) => MokaBlobStore::with_capacity(max_size),
            None => MokaBlobStore::new(),
        };
        Ok(Arc::new(store))
    },
};
