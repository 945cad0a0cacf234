//! Public JSON Web Keys

use crate::entities::Key;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Public RSA JWK as published for token verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicJwk {
    /// Key type, always `RSA`
    pub kty: String,
    /// Public key use, always `sig`
    #[serde(rename = "use")]
    pub key_use: String,
    /// JWS algorithm
    pub alg: String,
    /// Key id (JWK thumbprint)
    pub kid: String,
    /// Base64url modulus
    pub n: String,
    /// Base64url public exponent
    pub e: String,
}

/// JWK Set document (RFC 7517 §5)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    /// Keys currently valid for verification, oldest first
    pub keys: Vec<PublicJwk>,
}

impl JwkSet {
    /// Build a set from a verification window
    pub fn from_keys(keys: &[Arc<Key>]) -> Self {
        Self {
            keys: keys.iter().map(|key| key.public_jwk()).collect(),
        }
    }

    /// Find a key by id
    pub fn find(&self, kid: &str) -> Option<&PublicJwk> {
        self.keys.iter().find(|jwk| jwk.kid == kid)
    }
}
