//! Key rotation configuration types

use crate::constants::DEFAULT_ROTATION_INTERVAL_SECS;
use authkeys_domain::constants::DEFAULT_KEY_STRENGTH;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Key rotation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Bucket width in seconds; must match the access-token lifetime
    pub interval_secs: u64,

    /// RSA modulus size in bits for generated keys
    pub key_strength: usize,
}

impl RotationConfig {
    /// Bucket width as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_ROTATION_INTERVAL_SECS,
            key_strength: DEFAULT_KEY_STRENGTH,
        }
    }
}
