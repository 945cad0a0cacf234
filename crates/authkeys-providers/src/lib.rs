//! # authkeys - Provider Implementations
//!
//! Blob store backends used as the coordination medium for key rotation.
//! Each backend implements the `BlobStore` port defined in `authkeys-domain`
//! and registers itself in the application layer's linkme registry.
//!
//! | Provider | Name | Description |
//! |----------|------|-------------|
//! | [`MokaBlobStore`](blob_store::MokaBlobStore) | `memory` | Single-process in-memory store |
//! | [`RedisBlobStore`](blob_store::RedisBlobStore) | `redis` | `SET NX PX` on a shared Redis |
//! | [`PostgresBlobStore`](blob_store::PostgresBlobStore) | `postgres` | Unique-keyed table with expiry column |
//! | [`EncryptedBlobStore`](blob_store::EncryptedBlobStore) | - | AES-GCM decorator around any of the above |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! authkeys-providers = { version = "0.1", default-features = false, features = ["blobstore-redis"] }
//! ```

// Re-export domain types commonly used with providers
pub use authkeys_domain::error::{Error, Result};
pub use authkeys_domain::ports::providers::{BlobStore, CryptoProvider, EncryptedData};

/// Provider-specific constants
pub mod constants;

/// Blob store provider implementations
pub mod blob_store;
