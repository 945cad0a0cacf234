//! External Provider Ports
//!
//! Ports for external services the domain depends on.
//!
//! ## Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | BlobStore | Shared key/value store with NX-writes and TTLs |
//! | CryptoProvider | Authenticated encryption for data at rest |

/// Blob store provider port
pub mod blob_store;
/// Crypto provider port
pub mod crypto;

// Re-export provider ports for convenience
pub use blob_store::BlobStore;
pub use crypto::{CryptoProvider, EncryptedData};
