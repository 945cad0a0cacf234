//! Key Store Rotation Use Case
//!
//! Brings a [`RotatingKeyStore`] up to date at startup and keeps it current,
//! using a shared blob store as the only coordination medium between
//! processes.
//!
//! ## Protocol
//!
//! Every process derives the same bucket from its clock. For a bucket with no
//! stored key, each racing process generates a fresh key and tries to
//! NX-write it under `rsa:<bucket>`. Exactly one write wins; every loser reads
//! the winner back and discards its own key, so the whole fleet converges on
//! one key per bucket without a lock.

use crate::domain_services::{EpochIntervalTicker, RotatingKeyStore};
use authkeys_domain::constants::MIN_KEY_STRENGTH;
use authkeys_domain::entities::Key;
use authkeys_domain::error::{Error, Result};
use authkeys_domain::ports::infrastructure::{Clock, ErrorReporter, KeyStore};
use authkeys_domain::ports::providers::BlobStore;
use authkeys_domain::value_objects::{Bucket, key_blob_ttl};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Outcome of one create-or-adopt decision for a bucket
#[derive(Debug)]
pub enum Generation {
    /// Our NX-write won; the generated key is now the bucket's key
    Won(Arc<Key>),
    /// A peer won the race; its key was adopted and ours thrown away
    Adopted {
        /// The stored key read back from the blob store
        winner: Arc<Key>,
        /// The locally generated key that lost
        discarded: Key,
    },
}

impl Generation {
    /// The bucket's authoritative key
    pub fn key(&self) -> &Arc<Key> {
        match self {
            Self::Won(key) | Self::Adopted { winner: key, .. } => key,
        }
    }

    /// Consume the outcome, keeping the authoritative key
    pub fn into_key(self) -> Arc<Key> {
        match self {
            Self::Won(key) | Self::Adopted { winner: key, .. } => key,
        }
    }

    /// Whether this process's key became the bucket's key
    pub fn is_won(&self) -> bool {
        matches!(self, Self::Won(_))
    }
}

/// Distributed generate/restore/rotate orchestrator
pub struct KeyStoreRotater {
    store: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    key_strength: usize,
}

impl KeyStoreRotater {
    /// Create a rotater
    ///
    /// `interval` is the bucket width and must match the access-token
    /// lifetime; `key_strength` is the RSA modulus size in bits.
    pub fn new(
        store: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
        interval: Duration,
        key_strength: usize,
    ) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::invalid_argument("Rotation interval must be non-zero"));
        }
        if key_strength < MIN_KEY_STRENGTH {
            return Err(Error::invalid_argument(format!(
                "RSA key strength {key_strength} is below the minimum of {MIN_KEY_STRENGTH} bits"
            )));
        }
        Ok(Self {
            store,
            clock,
            interval,
            key_strength,
        })
    }

    /// Bucket width
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// RSA modulus size for generated keys
    pub fn key_strength(&self) -> usize {
        self.key_strength
    }

    /// The bucket the clock currently falls in
    pub fn current_bucket(&self) -> Bucket {
        Bucket::at(self.clock.now(), self.interval)
    }

    /// Read the stored key for `bucket`
    ///
    /// # Returns
    /// `None` when the bucket has no key yet or it has expired
    pub async fn find(&self, bucket: Bucket) -> Result<Option<Key>> {
        let name = bucket.blob_name();
        match self.store.read(&name).await? {
            Some(pem) => Key::from_pem(&pem).map(Some),
            None => Ok(None),
        }
    }

    /// Load the previous and current bucket keys into `keys`
    ///
    /// Generates a current key when none is stored. Any storage or decoding
    /// failure is returned; the caller must not serve signing requests
    /// without a key.
    ///
    /// # Returns
    /// The bucket that was treated as current
    pub async fn restore(&self, keys: &RotatingKeyStore) -> Result<Bucket> {
        let bucket = self.current_bucket();
        let previous = self.find(bucket.previous()).await?;
        let current = self.find(bucket).await?;

        if let Some(key) = previous {
            debug!(bucket = bucket.previous().value(), key_id = key.id(), "Restored previous key");
            keys.rotate(Arc::new(key));
        }

        match current {
            Some(key) => {
                info!(bucket = bucket.value(), key_id = key.id(), "Restored current key");
                keys.rotate(Arc::new(key));
            }
            None => {
                debug!(bucket = bucket.value(), "No stored key for current bucket");
                let generation = self.generate_for(bucket).await?;
                keys.rotate(generation.into_key());
            }
        }

        Ok(bucket)
    }

    /// Create or adopt the key for the current bucket
    pub async fn generate(&self) -> Result<Generation> {
        self.generate_for(self.current_bucket()).await
    }

    /// Create or adopt the key for `bucket`
    ///
    /// Always generates a fresh key first, then makes exactly one NX-write
    /// attempt. Losing the race is not an error: the winner is read back and
    /// returned as [`Generation::Adopted`].
    pub async fn generate_for(&self, bucket: Bucket) -> Result<Generation> {
        let name = bucket.blob_name();
        let candidate = self.generate_key().await?;
        let pem = candidate.to_pem()?;

        if self
            .store
            .write_nx(&name, &pem, key_blob_ttl(self.interval))
            .await?
        {
            info!(bucket = bucket.value(), key_id = candidate.id(), "Generated key won");
            return Ok(Generation::Won(Arc::new(candidate)));
        }

        let Some(winner) = self.find(bucket).await? else {
            return Err(Error::storage(format!(
                "Blob {name} was not readable after losing the create race"
            )));
        };
        debug!(
            bucket = bucket.value(),
            key_id = winner.id(),
            discarded = candidate.id(),
            "Adopted peer key"
        );
        Ok(Generation::Adopted {
            winner: Arc::new(winner),
            discarded: candidate,
        })
    }

    /// Create or adopt the key for `bucket` and install it in `keys`
    ///
    /// A key already installed as current is not rotated in twice.
    pub async fn rotate(&self, keys: &RotatingKeyStore, bucket: Bucket) -> Result<Arc<Key>> {
        let key = self.generate_for(bucket).await?.into_key();
        if keys.key().is_some_and(|current| current.id() == key.id()) {
            debug!(bucket = bucket.value(), key_id = key.id(), "Key already current");
            return Ok(key);
        }
        keys.rotate(Arc::clone(&key));
        info!(bucket = bucket.value(), key_id = key.id(), "Rotated signing key");
        Ok(key)
    }

    /// Restore keys and prepare periodic rotation
    ///
    /// Fails if the restore fails. On success the returned task must be
    /// spawned (or awaited) to keep the window current; it runs until
    /// `cancel` fires.
    pub async fn maintain(
        self: Arc<Self>,
        keys: Arc<RotatingKeyStore>,
        reporter: Arc<dyn ErrorReporter>,
        cancel: CancellationToken,
    ) -> Result<RotationTask> {
        let restored = self.restore(&keys).await?;
        Ok(RotationTask {
            rotater: self,
            keys,
            reporter,
            cancel,
            restored,
        })
    }

    async fn generate_key(&self) -> Result<Key> {
        let bits = self.key_strength;
        tokio::task::spawn_blocking(move || Key::generate(bits))
            .await
            .map_err(|e| Error::internal(format!("Key generation task failed: {e}")))?
    }
}

impl fmt::Debug for KeyStoreRotater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStoreRotater")
            .field("store", &self.store)
            .field("interval", &self.interval)
            .field("key_strength", &self.key_strength)
            .finish_non_exhaustive()
    }
}

/// Background rotation loop returned by [`KeyStoreRotater::maintain`]
pub struct RotationTask {
    rotater: Arc<KeyStoreRotater>,
    keys: Arc<RotatingKeyStore>,
    reporter: Arc<dyn ErrorReporter>,
    cancel: CancellationToken,
    restored: Bucket,
}

impl RotationTask {
    /// The bucket that was current when keys were restored
    pub fn restored_bucket(&self) -> Bucket {
        self.restored
    }

    /// Rotate at every bucket boundary until cancelled
    ///
    /// Failures are reported and swallowed; the window keeps its last good
    /// key and the next tick retries.
    pub async fn run(self) {
        let mut ticker = EpochIntervalTicker::starting_at(
            Arc::clone(&self.rotater.clock),
            self.rotater.interval,
            self.restored,
            self.cancel.child_token(),
        );

        loop {
            let bucket = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                tick = ticker.tick() => match tick {
                    Some(bucket) => bucket,
                    None => break,
                },
            };

            let rotation = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                rotation = self.rotater.rotate(&self.keys, bucket) => rotation,
            };
            if let Err(e) = rotation {
                warn!(bucket = bucket.value(), error = %e, "Key rotation failed");
                self.reporter.report_error(&e);
            }
        }
        info!("Key rotation stopped");
    }
}
