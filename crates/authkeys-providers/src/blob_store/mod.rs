//! Blob Store Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`MokaBlobStore`] | Local | In-memory store for tests and single-process deployments |
//! | [`RedisBlobStore`] | Distributed | Redis-backed store for multi-instance deployments |
//! | [`PostgresBlobStore`] | Distributed | PostgreSQL-backed store for multi-instance deployments |
//! | [`EncryptedBlobStore`] | Decorator | Encrypts values at rest for any provider |
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: Use `MokaBlobStore`
//! - **Multi Instance**: Use `RedisBlobStore` or `PostgresBlobStore`; the
//!   in-memory store cannot coordinate separate processes

pub mod encrypted;
#[cfg(feature = "blobstore-memory")]
pub mod moka;
#[cfg(feature = "blobstore-postgres")]
pub mod postgres;
#[cfg(feature = "blobstore-redis")]
pub mod redis;

// Re-export for convenience
pub use encrypted::EncryptedBlobStore;
#[cfg(feature = "blobstore-memory")]
pub use moka::MokaBlobStore;
#[cfg(feature = "blobstore-postgres")]
pub use postgres::PostgresBlobStore;
#[cfg(feature = "blobstore-redis")]
pub use redis::RedisBlobStore;
