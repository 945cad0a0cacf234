//! Composition root
//!
//! Wires configuration, the registered blob store backend, encryption at
//! rest and the key rotater into an [`AppContext`].
//!
//! ```text
//! AppConfig → registry → BlobStore → EncryptedBlobStore → KeyStoreRotater
//!                ↑                                            │ restore
//!             linkme                                          ▼
//!                                      RotatingKeyStore ← RotationTask (spawned)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?).await?;
//!
//! let token = context.signer().sign(&claims)?;
//! let jwks = context.jwks();
//!
//! context.shutdown().shutdown(SHUTDOWN_TIMEOUT).await;
//! ```

use crate::config::AppConfig;
use crate::crypto::{TokenSigner, TokenVerifier};
use crate::reporting::TracingErrorReporter;
use crate::shutdown::ShutdownCoordinator;
use authkeys_application::domain_services::{RotatingKeyStore, SystemClock};
use authkeys_application::ports::registry::resolve_blob_store_provider;
use authkeys_application::use_cases::KeyStoreRotater;
use authkeys_domain::error::{Error, Result};
use authkeys_domain::ports::infrastructure::{Clock, ErrorReporter, KeyStore};
use authkeys_domain::ports::providers::BlobStore;
use authkeys_domain::value_objects::{Bucket, JwkSet};
use authkeys_providers::blob_store::EncryptedBlobStore;
use std::sync::Arc;
use tracing::info;

/// Application context
///
/// Holds a populated key window; a background task keeps it current until
/// [`ShutdownCoordinator::shutdown`] is called.
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    blob_store: Arc<dyn BlobStore>,
    key_store: Arc<RotatingKeyStore>,
    rotater: Arc<KeyStoreRotater>,
    shutdown: ShutdownCoordinator,
    restored: Bucket,
}

impl AppContext {
    /// The encrypting blob store keys are persisted through
    pub fn blob_store(&self) -> Arc<dyn BlobStore> {
        Arc::clone(&self.blob_store)
    }

    /// The live key window
    pub fn key_store(&self) -> Arc<RotatingKeyStore> {
        Arc::clone(&self.key_store)
    }

    /// The rotater driving the window
    pub fn rotater(&self) -> Arc<KeyStoreRotater> {
        Arc::clone(&self.rotater)
    }

    /// The bucket that was current at startup
    pub fn restored_bucket(&self) -> Bucket {
        self.restored
    }

    /// Public keys currently valid for verification
    pub fn jwks(&self) -> JwkSet {
        JwkSet::from_keys(&self.key_store.keys())
    }

    /// Token signer over the live window
    pub fn signer(&self) -> TokenSigner {
        TokenSigner::new(self.key_store())
    }

    /// Token verifier over the live window
    pub fn verifier(&self) -> TokenVerifier {
        TokenVerifier::new(self.key_store())
    }

    /// Background task lifecycle
    pub fn shutdown(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("blob_store", &self.blob_store)
            .field("key_store", &self.key_store)
            .field("rotater", &self.rotater)
            .field("restored", &self.restored)
            .finish_non_exhaustive()
    }
}

/// Initialize the application context from configuration
///
/// Resolves the configured blob store from the provider registry. Providers
/// are auto-registered via linkme when authkeys-providers is linked.
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    let provider_config = config.blob_store.to_provider_config();
    let store = resolve_blob_store_provider(&provider_config)
        .map_err(|e| Error::configuration(format!("BlobStore: {e}")))?;
    info!(provider = store.provider_name(), "Resolved blob store");

    init_app_with_store(config, store, Arc::new(SystemClock)).await
}

/// Initialize the application context over an existing backend
///
/// `store` receives ciphertext only; it is wrapped in an
/// [`EncryptedBlobStore`] keyed from `config.secrets`. Fails without
/// spawning anything if the initial restore fails.
pub async fn init_app_with_store(
    config: AppConfig,
    store: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
) -> Result<AppContext> {
    let config = Arc::new(config);

    let crypto = Arc::new(config.secrets.crypto_service()?);
    let blob_store: Arc<dyn BlobStore> = Arc::new(EncryptedBlobStore::new(store, crypto));

    let rotater = Arc::new(KeyStoreRotater::new(
        Arc::clone(&blob_store),
        clock,
        config.rotation.interval(),
        config.rotation.key_strength,
    )?);
    let key_store = Arc::new(RotatingKeyStore::new());
    let reporter: Arc<dyn ErrorReporter> = Arc::new(TracingErrorReporter);
    let shutdown = ShutdownCoordinator::new();

    let task = Arc::clone(&rotater)
        .maintain(Arc::clone(&key_store), reporter, shutdown.child_token())
        .await?;
    let restored = task.restored_bucket();
    shutdown.spawn("key-rotation", task.run());

    info!(
        bucket = restored.value(),
        keys = key_store.len(),
        interval_secs = config.rotation.interval_secs,
        "Key store ready"
    );

    Ok(AppContext {
        config,
        blob_store,
        key_store,
        rotater,
        shutdown,
        restored,
    })
}
