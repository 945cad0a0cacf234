//! Domain Port Interfaces
//!
//! Defines all boundary contracts between domain and external layers.
//!
//! ## Organization
//!
//! - **infrastructure/** - In-process services (key store, error reporting, clock)
//! - **providers/** - External service provider ports (blob stores, crypto)

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

// Re-export commonly used port traits for convenience
pub use infrastructure::{Clock, ErrorReporter, KeyStore};
pub use providers::{BlobStore, CryptoProvider, EncryptedData};
