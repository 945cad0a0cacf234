//! Provider Registry System
//!
//! Defines the auto-registration infrastructure for blob store backends.
//! Uses the `linkme` crate for compile-time registration of providers
//! that can be discovered and instantiated at runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Provider Registration Flow                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Provider defines:  #[linkme::distributed_slice(PROVIDERS)]  │
//! │                        static ENTRY: ProviderEntry = ...        │
//! │                              ↓                                  │
//! │  2. Registry declares: #[linkme::distributed_slice]             │
//! │                        pub static PROVIDERS: [Entry] = [..]     │
//! │                              ↓                                  │
//! │  3. Resolver queries:  PROVIDERS.iter()                         │
//! │                              ↓                                  │
//! │  4. Config selects:    "provider = redis" → RedisBlobStore      │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ### Registering a Provider (in authkeys-providers)
//!
//! ```ignore
//! use authkeys_application::ports::registry::{BlobStoreProviderEntry, BLOB_STORE_PROVIDERS};
//!
//! #[linkme::distributed_slice(BLOB_STORE_PROVIDERS)]
//! static REDIS_PROVIDER: BlobStoreProviderEntry = BlobStoreProviderEntry {
//!     name: "redis",
//!     description: "Redis shared blob store",
//!     factory: |config| Ok(Arc::new(RedisBlobStore::from_config(config)?)),
//! };
//! ```
//!
//! ### Resolving a Provider (in authkeys-infrastructure)
//!
//! ```ignore
//! use authkeys_application::ports::registry::resolve_blob_store_provider;
//!
//! let config = BlobStoreProviderConfig::new("redis").with_uri("redis://cache:6379");
//! let store = resolve_blob_store_provider(&config)?;
//! ```

pub mod blob_store;

pub use blob_store::{
    BLOB_STORE_PROVIDERS, BlobStoreProviderConfig, BlobStoreProviderEntry,
    list_blob_store_providers, resolve_blob_store_provider,
};
