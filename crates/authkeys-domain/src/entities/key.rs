//! Signing key entity
//!
//! A [`Key`] is an RSA private key plus its canonical identifier: the RFC 7638
//! SHA-256 JWK thumbprint of the public half, base64url-encoded without
//! padding. The identifier doubles as the JWT `kid` header and the JWKS entry
//! id, so it must come out identical in every process that holds the same
//! modulus and exponent.
//!
//! Keys are persisted as PKCS#1 PEM and are immutable once constructed.

use crate::constants::SIGNING_ALGORITHM;
use crate::error::{Error, Result};
use crate::value_objects::PublicJwk;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, LineEnding};
use rsa::rand_core::{CryptoRngCore, OsRng};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Required members of an RSA JWK in lexicographic order (RFC 7638 §3.2)
#[derive(Serialize)]
struct ThumbprintMembers<'a> {
    e: &'a str,
    kty: &'a str,
    n: &'a str,
}

/// RSA signing key with a deterministic key id
#[derive(Clone)]
pub struct Key {
    private: RsaPrivateKey,
    id: String,
}

impl Key {
    /// Generate a fresh RSA keypair of `bits` strength
    pub fn generate(bits: usize) -> Result<Self> {
        Self::generate_with_rng(&mut OsRng, bits)
    }

    /// Generate a fresh RSA keypair using the provided RNG
    pub fn generate_with_rng<R: CryptoRngCore + ?Sized>(rng: &mut R, bits: usize) -> Result<Self> {
        let private = RsaPrivateKey::new(rng, bits)
            .map_err(|e| Error::key_generation(format!("RSA-{bits} generation failed: {e}")))?;
        Self::new(private)
    }

    /// Wrap an existing private key, computing its key id
    pub fn new(private: RsaPrivateKey) -> Result<Self> {
        let id = thumbprint(&private.to_public_key())?;
        Ok(Self { private, id })
    }

    /// Parse a PKCS#1 PEM document (`RSA PRIVATE KEY`)
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(pem)
            .map_err(|e| Error::key_encoding(format!("PEM is not valid UTF-8: {e}")))?;
        let private = RsaPrivateKey::from_pkcs1_pem(text)
            .map_err(|e| Error::key_encoding(format!("Invalid PKCS#1 PEM: {e}")))?;
        Self::new(private)
    }

    /// Serialize the private key as PKCS#1 PEM
    pub fn to_pem(&self) -> Result<Vec<u8>> {
        let pem = self
            .private
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| Error::key_encoding(format!("PKCS#1 PEM encoding failed: {e}")))?;
        Ok(pem.as_bytes().to_vec())
    }

    /// Serialize the private key as PKCS#1 DER
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let der = self
            .private
            .to_pkcs1_der()
            .map_err(|e| Error::key_encoding(format!("PKCS#1 DER encoding failed: {e}")))?;
        Ok(der.as_bytes().to_vec())
    }

    /// Key id (JWK SHA-256 thumbprint, base64url without padding)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The wrapped private key
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// The public half of the key
    pub fn public_key(&self) -> RsaPublicKey {
        self.private.to_public_key()
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.private.size() * 8
    }

    /// Base64url modulus and exponent of the public key
    pub fn public_components(&self) -> (String, String) {
        encoded_components(&self.private.to_public_key())
    }

    /// Public JWK suitable for publishing in a JWKS document
    pub fn public_jwk(&self) -> PublicJwk {
        let (n, e) = self.public_components();
        PublicJwk {
            kty: "RSA".to_string(),
            key_use: "sig".to_string(),
            alg: SIGNING_ALGORITHM.to_string(),
            kid: self.id.clone(),
            n,
            e,
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Key {}

// Never print private material
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("id", &self.id)
            .field("bits", &self.bits())
            .finish()
    }
}

fn encoded_components(public: &RsaPublicKey) -> (String, String) {
    (
        URL_SAFE_NO_PAD.encode(public.n().to_bytes_be()),
        URL_SAFE_NO_PAD.encode(public.e().to_bytes_be()),
    )
}

/// RFC 7638 thumbprint of an RSA public key
fn thumbprint(public: &RsaPublicKey) -> Result<String> {
    let (n, e) = encoded_components(public);
    let canonical = serde_json::to_vec(&ThumbprintMembers {
        e: &e,
        kty: "RSA",
        n: &n,
    })?;
    Ok(URL_SAFE_NO_PAD.encode(Sha256::digest(&canonical)))
}
