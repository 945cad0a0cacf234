//! Rotating key window
//!
//! Holds the signing key and, after the first rotation, the key it replaced.
//! Every signing and verification call site reads through this window; the
//! rotation task is its only writer.

use authkeys_domain::constants::KEY_WINDOW_SIZE;
use authkeys_domain::entities::Key;
use authkeys_domain::ports::infrastructure::KeyStore;
use std::sync::{Arc, PoisonError, RwLock};

/// Ordered window of at most two keys, oldest first
///
/// The last element is the current signing key. When two keys are present
/// the first is the previous key, kept only so tokens signed just before a
/// rotation still verify.
#[derive(Debug, Default)]
pub struct RotatingKeyStore {
    window: RwLock<Arc<[Arc<Key>]>>,
}

impl RotatingKeyStore {
    /// Create an empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `key` as the current key
    ///
    /// The prior current key (if any) becomes the previous key and anything
    /// older is dropped. Readers only ever wait for a pointer swap.
    pub fn rotate(&self, key: Arc<Key>) {
        let mut window = self.window.write().unwrap_or_else(PoisonError::into_inner);
        let next: Arc<[Arc<Key>]> = match window.last() {
            Some(previous) => Arc::from([Arc::clone(previous), key]),
            None => Arc::from([key]),
        };
        debug_assert!(next.len() <= KEY_WINDOW_SIZE);
        *window = next;
    }

    /// Number of keys in the window
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether no key has been installed yet
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    fn snapshot(&self) -> Arc<[Arc<Key>]> {
        Arc::clone(&self.window.read().unwrap_or_else(PoisonError::into_inner))
    }
}

impl KeyStore for RotatingKeyStore {
    fn key(&self) -> Option<Arc<Key>> {
        self.snapshot().last().cloned()
    }

    fn keys(&self) -> Vec<Arc<Key>> {
        self.snapshot().to_vec()
    }
}
