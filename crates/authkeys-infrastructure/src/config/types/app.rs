//! Main application configuration

use super::{BlobStoreConfig, LoggingConfig, RotationConfig, SecretsConfig};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Key rotation configuration
    pub rotation: RotationConfig,
    /// Shared blob store configuration
    pub blob_store: BlobStoreConfig,
    /// Blob encryption secrets
    pub secrets: SecretsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}
