//! Domain entities

/// RSA signing key with a deterministic id
pub mod key;

pub use key::Key;
