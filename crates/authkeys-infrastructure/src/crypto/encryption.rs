//! Encryption/decryption service using AES-GCM

use crate::constants::{BLOB_KEY_DERIVATION_ITERATIONS, BLOB_KEY_DERIVATION_SALT};
use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng as AeadOsRng, rand_core::RngCore as AeadRngCore},
};
use authkeys_domain::constants::{AES_GCM_KEY_SIZE, AES_GCM_NONCE_SIZE, AES_GCM_TAG_SIZE};
use authkeys_domain::error::{Error, Result};
use authkeys_domain::ports::providers::{CryptoProvider, EncryptedData};
use sha2::Sha256;
use std::fmt;

/// Encryption/decryption service
///
/// Implements the CryptoProvider port from authkeys-domain with AES-256-GCM.
#[derive(Clone)]
pub struct CryptoService {
    /// Master key for encryption operations
    master_key: Vec<u8>,
}

impl CryptoService {
    /// Create a new crypto service with the provided master key
    pub fn new(master_key: Vec<u8>) -> Result<Self> {
        if master_key.len() != AES_GCM_KEY_SIZE {
            return Err(Error::configuration(format!(
                "Invalid master key size: expected {AES_GCM_KEY_SIZE} bytes, got {}",
                master_key.len()
            )));
        }

        Ok(Self { master_key })
    }

    /// Create a crypto service from a hex-encoded 32-byte key
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let master_key = hex::decode(encoded.trim()).map_err(|e| {
            Error::configuration_with_source("Encryption key is not valid hex", e)
        })?;
        Self::new(master_key)
    }

    /// Create a crypto service keyed by PBKDF2 over the secret key base
    pub fn from_secret_key_base(secret_key_base: &str) -> Self {
        Self {
            master_key: KeyDerivation::pbkdf2(
                secret_key_base,
                BLOB_KEY_DERIVATION_SALT,
                BLOB_KEY_DERIVATION_ITERATIONS,
                AES_GCM_KEY_SIZE,
            ),
        }
    }

    /// Generate a random master key
    pub fn generate_master_key() -> Vec<u8> {
        let mut key = vec![0u8; AES_GCM_KEY_SIZE];
        AeadOsRng.fill_bytes(&mut key);
        key
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.master_key))
    }

    /// Encrypt data using AES-GCM with a fresh random nonce
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData> {
        let nonce = Aes256Gcm::generate_nonce(&mut AeadOsRng);

        let mut ciphertext = self
            .cipher()
            .encrypt(&nonce, plaintext)
            .map_err(|e| Error::encryption(format!("Encryption failed: {e}")))?;

        // aes-gcm appends the tag; it is stored as its own segment
        let split = ciphertext
            .len()
            .checked_sub(AES_GCM_TAG_SIZE)
            .ok_or_else(|| Error::encryption("Ciphertext shorter than the GCM tag"))?;
        let tag = ciphertext.split_off(split);

        Ok(EncryptedData::new(ciphertext, nonce.to_vec(), tag))
    }

    /// Decrypt and authenticate data using AES-GCM
    pub fn decrypt(&self, encrypted_data: &EncryptedData) -> Result<Vec<u8>> {
        if encrypted_data.nonce.len() != AES_GCM_NONCE_SIZE {
            return Err(Error::decryption(format!(
                "Invalid nonce length: expected {AES_GCM_NONCE_SIZE}, got {}",
                encrypted_data.nonce.len()
            )));
        }
        if encrypted_data.tag.len() != AES_GCM_TAG_SIZE {
            return Err(Error::decryption(format!(
                "Invalid tag length: expected {AES_GCM_TAG_SIZE}, got {}",
                encrypted_data.tag.len()
            )));
        }

        let nonce = Nonce::from_slice(&encrypted_data.nonce);
        let mut sealed =
            Vec::with_capacity(encrypted_data.ciphertext.len() + encrypted_data.tag.len());
        sealed.extend_from_slice(&encrypted_data.ciphertext);
        sealed.extend_from_slice(&encrypted_data.tag);

        self.cipher()
            .decrypt(nonce, sealed.as_ref())
            .map_err(|_| Error::decryption("Authentication failed: wrong key or tampered data"))
    }
}

// Implement the CryptoProvider port from authkeys-domain
impl CryptoProvider for CryptoService {
    fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData> {
        CryptoService::encrypt(self, plaintext)
    }

    fn decrypt(&self, encrypted_data: &EncryptedData) -> Result<Vec<u8>> {
        CryptoService::decrypt(self, encrypted_data)
    }

    fn provider_name(&self) -> &str {
        "aes-256-gcm"
    }
}

// Never print the master key
impl fmt::Debug for CryptoService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoService").finish_non_exhaustive()
    }
}

/// Key derivation utilities
pub struct KeyDerivation;

impl KeyDerivation {
    /// Derive a key from password using PBKDF2-HMAC-SHA256
    pub fn pbkdf2(password: &str, salt: &[u8], iterations: u32, key_len: usize) -> Vec<u8> {
        use pbkdf2::pbkdf2_hmac;

        let mut key = vec![0u8; key_len];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
        key
    }
}
