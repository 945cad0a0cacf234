//! Domain layer constants
//!
//! Values that every process sharing a blob store must agree on. Changing any
//! of these is a breaking change for a running fleet.

use std::time::Duration;

/// Prefix of the blob name holding a bucket's signing key (`rsa:<bucket>`)
pub const KEY_BLOB_PREFIX: &str = "rsa";

/// Default RSA modulus size in bits
pub const DEFAULT_KEY_STRENGTH: usize = 2048;

/// Smallest RSA modulus size accepted for signing keys
pub const MIN_KEY_STRENGTH: usize = 1024;

/// Extra lifetime granted to a stored key past its lookback window
pub const KEY_BLOB_TTL_GRACE: Duration = Duration::from_secs(10);

/// Upper bound on how long the epoch ticker sleeps between checks
pub const TICKER_MAX_SLEEP: Duration = Duration::from_secs(30);

/// Number of keys retained by the rotating window (previous + current)
pub const KEY_WINDOW_SIZE: usize = 2;

/// JWS algorithm used with the rotating keys
pub const SIGNING_ALGORITHM: &str = "RS256";

/// AES-256-GCM key size in bytes
pub const AES_GCM_KEY_SIZE: usize = 32;

/// AES-GCM nonce size in bytes
pub const AES_GCM_NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes
pub const AES_GCM_TAG_SIZE: usize = 16;

/// Separator between the segments of an encrypted blob
pub const ENCRYPTED_SEGMENT_SEPARATOR: &str = "--";
