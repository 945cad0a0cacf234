//! Provider Constants
//!
//! Constants specific to blob store backends. Domain constants live in
//! authkeys-domain.

use std::time::Duration;

// ============================================================================
// IN-MEMORY STORE CONSTANTS
// ============================================================================

/// Default entry capacity of the in-memory blob store
pub const MEMORY_BLOB_STORE_DEFAULT_CAPACITY: u64 = 10_000;

// ============================================================================
// POSTGRES STORE CONSTANTS
// ============================================================================

/// Table holding blobs
pub const POSTGRES_BLOB_TABLE: &str = "authkeys_blobs";

/// Default connection pool size
pub const POSTGRES_DEFAULT_POOL_SIZE: u32 = 4;

/// Time to wait for a pooled connection
pub const POSTGRES_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);
