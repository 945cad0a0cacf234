//! Key Store Port
//!
//! The capability every token-signing and token-verification call site
//! consumes: the key for new signatures plus the window of keys still valid
//! for verification.

use crate::entities::Key;
use std::sync::Arc;

/// Read side of the rotating signing key window
///
/// Returned keys and vectors are snapshots; callers never mutate them.
pub trait KeyStore: Send + Sync {
    /// The key to use for new signatures
    ///
    /// # Returns
    /// `None` only before the first key has been installed
    fn key(&self) -> Option<Arc<Key>>;

    /// All keys still valid for verification, oldest first
    fn keys(&self) -> Vec<Arc<Key>>;
}
