//! Secret material configuration types

use crate::crypto::CryptoService;
use authkeys_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Secrets used to encrypt stored keys
///
/// Either value is enough. When both are set, `encryption_key` is used and
/// `secret_key_base` is ignored.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    /// Application secret; the blob key is derived from it with PBKDF2
    pub secret_key_base: Option<String>,

    /// Explicit 256-bit blob key as 64 hex characters
    pub encryption_key: Option<String>,
}

impl SecretsConfig {
    /// Whether any secret is configured
    pub fn is_configured(&self) -> bool {
        self.encryption_key.as_deref().is_some_and(|k| !k.is_empty())
            || self.secret_key_base.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Build the blob encryption service
    pub fn crypto_service(&self) -> Result<CryptoService> {
        match (
            non_empty(self.encryption_key.as_deref()),
            non_empty(self.secret_key_base.as_deref()),
        ) {
            (Some(hex_key), _) => CryptoService::from_hex(hex_key),
            (None, Some(base)) => Ok(CryptoService::from_secret_key_base(base)),
            (None, None) => Err(Error::configuration(
                "Either secrets.encryption_key or secrets.secret_key_base must be set",
            )),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl fmt::Debug for SecretsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("SecretsConfig")
            .field("secret_key_base", &redact(&self.secret_key_base))
            .field("encryption_key", &redact(&self.encryption_key))
            .finish()
    }
}
