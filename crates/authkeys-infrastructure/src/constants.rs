//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `authkeys_domain::constants`.

use std::time::Duration;

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "authkeys.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "authkeys";

/// Environment variable prefix for configuration (`AUTHKEYS__ROTATION__INTERVAL_SECS`)
pub const CONFIG_ENV_PREFIX: &str = "AUTHKEYS";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// ROTATION CONSTANTS
// ============================================================================

/// Default rotation interval in seconds (1 hour)
pub const DEFAULT_ROTATION_INTERVAL_SECS: u64 = 3600;

/// Default blob store provider
pub const DEFAULT_BLOB_STORE_PROVIDER: &str = "memory";

// ============================================================================
// ENCRYPTION CONSTANTS
// ============================================================================

/// Salt for deriving the blob encryption key from the secret key base
pub const BLOB_KEY_DERIVATION_SALT: &[u8] = b"DB-encryption";

/// PBKDF2 iterations for the blob encryption key
pub const BLOB_KEY_DERIVATION_ITERATIONS: u32 = 65_536;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "AUTHKEYS_LOG";

// ============================================================================
// LIFECYCLE CONSTANTS
// ============================================================================

/// Time allowed for background tasks to stop on shutdown
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);
