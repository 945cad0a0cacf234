//! Blob Store Provider Registry
//!
//! Auto-registration system for blob store backends.
//! Providers register themselves via `#[linkme::distributed_slice]` and are
//! discovered at runtime by iterating the slice.

use std::sync::Arc;

use authkeys_domain::ports::providers::BlobStore;

/// Configuration for blob store provider creation
///
/// Contains all configuration options that a blob store might need.
/// Providers should use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct BlobStoreProviderConfig {
    /// Provider name (e.g., "memory", "redis", "postgres")
    pub provider: String,
    /// Connection URI (for shared stores)
    pub uri: Option<String>,
    /// Namespace prefix for blob names
    pub namespace: Option<String>,
    /// Maximum number of entries (in-memory store)
    pub max_size: Option<u64>,
    /// Connection pool size (SQL store)
    pub pool_size: Option<u32>,
}

impl BlobStoreProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the max size
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Set the connection pool size
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = Some(pool_size);
        self
    }
}

/// Registry entry for blob store providers
///
/// Each backend registers itself with this entry. The entry contains
/// metadata and a factory function to create provider instances.
pub struct BlobStoreProviderEntry {
    /// Unique provider name (e.g., "memory", "redis", "postgres")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&BlobStoreProviderConfig) -> Result<Arc<dyn BlobStore>, String>,
}

#[linkme::distributed_slice]
pub static BLOB_STORE_PROVIDERS: [BlobStoreProviderEntry] = [..];

/// Resolve blob store provider by name from registry
///
/// # Arguments
/// * `config` - Configuration containing provider name and settings
///
/// # Returns
/// * `Ok(Arc<dyn BlobStore>)` - Created provider instance
/// * `Err(String)` - Error message if provider not found or creation failed
pub fn resolve_blob_store_provider(
    config: &BlobStoreProviderConfig,
) -> Result<Arc<dyn BlobStore>, String> {
    let provider_name = &config.provider;

    for entry in BLOB_STORE_PROVIDERS {
        if entry.name == provider_name {
            return (entry.factory)(config);
        }
    }

    // List available providers for helpful error message
    let available: Vec<&str> = BLOB_STORE_PROVIDERS.iter().map(|e| e.name).collect();

    Err(format!(
        "Unknown blob store provider '{provider_name}'. Available providers: {available:?}"
    ))
}

/// List all registered blob store providers
///
/// Returns a list of (name, description) tuples. Useful for CLI help.
pub fn list_blob_store_providers() -> Vec<(&'static str, &'static str)> {
    BLOB_STORE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
