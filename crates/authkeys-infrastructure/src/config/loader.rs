//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::AppConfig;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use authkeys_domain::constants::MIN_KEY_STRENGTH;
use authkeys_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `AUTHKEYS__ROTATION__INTERVAL_SECS`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore separates nested keys, single underscores stay in field names
        figment = figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find default configuration file paths to try
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_rotation_config(config)?;
    validate_blob_store_config(config)?;
    validate_secrets_config(config)?;
    validate_logging_config(config)?;
    Ok(())
}

fn validate_rotation_config(config: &AppConfig) -> Result<()> {
    if config.rotation.interval_secs == 0 {
        return Err(Error::configuration(
            "Rotation interval cannot be 0",
        ));
    }
    if config.rotation.key_strength < MIN_KEY_STRENGTH {
        return Err(Error::configuration(format!(
            "RSA key strength must be at least {MIN_KEY_STRENGTH} bits, got {}",
            config.rotation.key_strength
        )));
    }
    Ok(())
}

fn validate_blob_store_config(config: &AppConfig) -> Result<()> {
    let blob_store = &config.blob_store;
    if blob_store.provider.is_empty() {
        return Err(Error::configuration("Blob store provider cannot be empty"));
    }
    if !blob_store.is_memory() && blob_store.uri.as_deref().is_none_or(str::is_empty) {
        return Err(Error::configuration(format!(
            "Blob store provider '{}' requires a uri",
            blob_store.provider
        )));
    }
    if blob_store.max_size == Some(0) {
        return Err(Error::configuration("Blob store max_size cannot be 0"));
    }
    Ok(())
}

fn validate_secrets_config(config: &AppConfig) -> Result<()> {
    if !config.secrets.is_configured() {
        return Err(Error::configuration(
            "Either secrets.encryption_key or secrets.secret_key_base must be set",
        ));
    }
    if let Some(key) = config.secrets.encryption_key.as_deref().filter(|k| !k.is_empty()) {
        let valid = key.len() == 64 && key.chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(Error::configuration(
                "secrets.encryption_key must be 64 hex characters",
            ));
        }
    }
    Ok(())
}

fn validate_logging_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level).map(|_| ())
}
