//! RS256 token signing and verification against a key window

use authkeys_domain::constants::SIGNING_ALGORITHM;
use authkeys_domain::error::{Error, Result};
use authkeys_domain::ports::infrastructure::KeyStore;
use authkeys_domain::value_objects::JwkSet;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Signs tokens with the current key of a [`KeyStore`]
#[derive(Clone)]
pub struct TokenSigner {
    keys: Arc<dyn KeyStore>,
}

impl TokenSigner {
    /// Create a signer reading from `keys`
    pub fn new(keys: Arc<dyn KeyStore>) -> Self {
        Self { keys }
    }

    /// Sign `claims` with the current key
    ///
    /// The token header carries the key id as `kid`.
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String> {
        let key = self
            .keys
            .key()
            .ok_or_else(|| Error::token("No signing key available"))?;

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(key.id().to_string());

        let encoding_key = EncodingKey::from_rsa_der(&key.to_der()?);
        encode(&header, claims, &encoding_key)
            .map_err(|e| Error::token(format!("Failed to sign token: {e}")))
    }
}

/// Verifies tokens against every key in the window
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<dyn KeyStore>,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier with default RS256 validation (`exp` required)
    pub fn new(keys: Arc<dyn KeyStore>) -> Self {
        Self::with_validation(keys, Validation::new(Algorithm::RS256))
    }

    /// Create a verifier with custom validation rules
    pub fn with_validation(keys: Arc<dyn KeyStore>, mut validation: Validation) -> Self {
        validation.algorithms = vec![Algorithm::RS256];
        Self { keys, validation }
    }

    /// Verify `token` and decode its claims
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T> {
        let header =
            decode_header(token).map_err(|e| Error::token(format!("Malformed token: {e}")))?;
        let kid = header
            .kid
            .ok_or_else(|| Error::token("Token has no key id"))?;

        let jwks = JwkSet::from_keys(&self.keys.keys());
        let jwk = jwks
            .find(&kid)
            .ok_or_else(|| Error::token(format!("Unknown key id: {kid}")))?;
        if jwk.alg != SIGNING_ALGORITHM {
            return Err(Error::token(format!("Unsupported algorithm: {}", jwk.alg)));
        }

        let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(|e| Error::token(format!("Invalid verification key: {e}")))?;
        decode::<T>(token, &decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| Error::token(format!("Token rejected: {e}")))
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}
