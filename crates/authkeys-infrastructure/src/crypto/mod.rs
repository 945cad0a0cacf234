//! Cryptography
//!
//! AES-256-GCM encryption for blobs at rest and RS256 token handling over a
//! rotating key window.

pub mod encryption;
pub mod jwt;

pub use encryption::{CryptoService, KeyDerivation};
pub use jwt::{TokenSigner, TokenVerifier};
