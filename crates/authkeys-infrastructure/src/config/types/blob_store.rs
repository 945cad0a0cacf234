//! Blob store configuration types

use crate::constants::DEFAULT_BLOB_STORE_PROVIDER;
use authkeys_application::ports::registry::BlobStoreProviderConfig;
use serde::{Deserialize, Serialize};

/// Blob store configuration
///
/// `provider` names a backend registered in the provider registry
/// (`memory`, `redis`, `postgres`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobStoreConfig {
    /// Registered provider name
    pub provider: String,

    /// Connection URI for shared backends
    pub uri: Option<String>,

    /// Prefix applied to every blob name
    pub namespace: Option<String>,

    /// Entry capacity for the in-memory backend
    pub max_size: Option<u64>,

    /// Connection pool size for pooled backends
    pub pool_size: Option<u32>,
}

impl BlobStoreConfig {
    /// Whether the provider is the single-process in-memory backend
    pub fn is_memory(&self) -> bool {
        self.provider == DEFAULT_BLOB_STORE_PROVIDER
    }

    /// Build the registry lookup config
    pub fn to_provider_config(&self) -> BlobStoreProviderConfig {
        let mut config = BlobStoreProviderConfig::new(&self.provider);
        if let Some(uri) = &self.uri {
            config = config.with_uri(uri);
        }
        if let Some(namespace) = &self.namespace {
            config = config.with_namespace(namespace);
        }
        if let Some(max_size) = self.max_size {
            config = config.with_max_size(max_size);
        }
        if let Some(pool_size) = self.pool_size {
            config = config.with_pool_size(pool_size);
        }
        config
    }
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_BLOB_STORE_PROVIDER.to_string(),
            uri: None,
            namespace: None,
            max_size: None,
            pool_size: None,
        }
    }
}
