//! Encrypted blob store wrapper
//!
//! Provides encryption at rest for any blob store provider.
//!
//! ## Architecture
//!
//! This provider follows the Decorator pattern:
//! - Wraps any `BlobStore` implementation
//! - Encrypts values with a fresh nonce before every write
//! - Authenticates and decrypts values after every read
//! - Blob names and TTLs pass through unchanged
//!
//! Plaintext key material therefore only ever exists in process memory.
//!
//! ## Usage
//!
//! ```ignore
//! use authkeys_providers::blob_store::EncryptedBlobStore;
//!
//! let store = EncryptedBlobStore::new(inner_store, crypto_service);
//! ```

use async_trait::async_trait;
use authkeys_domain::error::Result;
use authkeys_domain::ports::providers::{BlobStore, CryptoProvider, EncryptedData};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Encrypted blob store provider
///
/// Stored values use the wire format produced by [`EncryptedData::to_wire`].
/// A value that fails to parse or authenticate surfaces as
/// [`Error::Decryption`](authkeys_domain::Error::Decryption) from `read`.
pub struct EncryptedBlobStore {
    /// Underlying blob store
    inner: Arc<dyn BlobStore>,
    /// Cryptography provider
    crypto: Arc<dyn CryptoProvider>,
}

impl EncryptedBlobStore {
    /// Create a new encrypted blob store
    ///
    /// # Arguments
    ///
    /// * `inner` - The underlying blob store to wrap
    /// * `crypto` - The cryptography provider for encryption operations
    pub fn new(inner: Arc<dyn BlobStore>, crypto: Arc<dyn CryptoProvider>) -> Self {
        Self { inner, crypto }
    }

    /// Get a reference to the inner store
    pub fn inner(&self) -> &Arc<dyn BlobStore> {
        &self.inner
    }

    fn seal(&self, blob: &[u8]) -> Result<Vec<u8>> {
        Ok(self.crypto.encrypt(blob)?.to_wire().into_bytes())
    }
}

#[async_trait]
impl BlobStore for EncryptedBlobStore {
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let Some(stored) = self.inner.read(name).await? else {
            return Ok(None);
        };
        let opened = EncryptedData::from_wire(&stored).and_then(|data| self.crypto.decrypt(&data));
        if let Err(e) = &opened {
            warn!(blob = name, error = %e, "Stored blob failed to decrypt");
        }
        opened.map(Some)
    }

    async fn write_nx(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<bool> {
        let sealed = self.seal(blob)?;
        self.inner.write_nx(name, &sealed, ttl).await
    }

    async fn write(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<()> {
        let sealed = self.seal(blob)?;
        self.inner.write(name, &sealed, ttl).await
    }

    fn provider_name(&self) -> &str {
        "encrypted"
    }
}

impl std::fmt::Debug for EncryptedBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedBlobStore")
            .field("inner", &self.inner)
            .field("crypto", &self.crypto.provider_name())
            .finish()
    }
}
