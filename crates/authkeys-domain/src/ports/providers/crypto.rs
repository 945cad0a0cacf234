//! Cryptographic Provider Port
//!
//! Defines the interface for symmetric encryption used by the encrypting
//! blob store decorator.
//!
//! ## Usage
//!
//! This port follows the Dependency Inversion Principle:
//! - The trait is defined here (authkeys-domain)
//! - Implementations live in authkeys-infrastructure (CryptoService)
//! - Providers depend on the abstraction, not the concrete implementation

use crate::constants::{
    AES_GCM_NONCE_SIZE, AES_GCM_TAG_SIZE, ENCRYPTED_SEGMENT_SEPARATOR,
};
use crate::error::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Cryptographic provider port
///
/// Defines the contract for authenticated encryption/decryption.
pub trait CryptoProvider: Send + Sync {
    /// Encrypt plaintext data with a fresh random nonce
    fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData>;

    /// Decrypt and authenticate encrypted data
    ///
    /// Fails with [`Error::Decryption`] on a wrong key or tampered data,
    /// never returns wrong plaintext.
    fn decrypt(&self, encrypted_data: &EncryptedData) -> Result<Vec<u8>>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

/// Encrypted data container
///
/// Holds the ciphertext, nonce and detached authentication tag produced by
/// AES-GCM. Serialized for storage as
/// `base64(ciphertext)--base64(nonce)--base64(tag)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData {
    /// The encrypted ciphertext, without the tag
    pub ciphertext: Vec<u8>,
    /// The nonce used for encryption
    pub nonce: Vec<u8>,
    /// The GCM authentication tag
    pub tag: Vec<u8>,
}

impl EncryptedData {
    /// Create a new encrypted data container
    pub fn new(ciphertext: Vec<u8>, nonce: Vec<u8>, tag: Vec<u8>) -> Self {
        Self {
            ciphertext,
            nonce,
            tag,
        }
    }

    /// Encode into the storage wire format
    pub fn to_wire(&self) -> String {
        [
            STANDARD.encode(&self.ciphertext),
            STANDARD.encode(&self.nonce),
            STANDARD.encode(&self.tag),
        ]
        .join(ENCRYPTED_SEGMENT_SEPARATOR)
    }

    /// Parse the storage wire format
    pub fn from_wire(wire: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(wire)
            .map_err(|_| Error::decryption("Encrypted blob is not valid UTF-8"))?;

        let segments: Vec<&str> = text.split(ENCRYPTED_SEGMENT_SEPARATOR).collect();
        let [ciphertext, nonce, tag] = segments.as_slice() else {
            return Err(Error::decryption(format!(
                "Encrypted blob has {} segments, expected 3",
                segments.len()
            )));
        };

        let decode = |segment: &str, what: &str| {
            STANDARD
                .decode(segment)
                .map_err(|e| Error::decryption(format!("Invalid base64 in {what}: {e}")))
        };
        let data = Self::new(
            decode(ciphertext, "ciphertext")?,
            decode(nonce, "nonce")?,
            decode(tag, "tag")?,
        );

        if data.nonce.len() != AES_GCM_NONCE_SIZE {
            return Err(Error::decryption(format!(
                "Invalid nonce length: expected {AES_GCM_NONCE_SIZE}, got {}",
                data.nonce.len()
            )));
        }
        if data.tag.len() != AES_GCM_TAG_SIZE {
            return Err(Error::decryption(format!(
                "Invalid tag length: expected {AES_GCM_TAG_SIZE}, got {}",
                data.tag.len()
            )));
        }

        Ok(data)
    }
}

impl fmt::Display for EncryptedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EncryptedData {{ ciphertext: {} bytes, nonce: {} bytes, tag: {} bytes }}",
            self.ciphertext.len(),
            self.nonce.len(),
            self.tag.len()
        )
    }
}
