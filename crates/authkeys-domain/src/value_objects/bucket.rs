//! Epoch-aligned time buckets
//!
//! A bucket is `floor(unix_time / interval)`. Buckets partition time into
//! non-overlapping windows that every process derives from nothing more than
//! its clock and the configured interval, which is what lets independent
//! processes agree on "the current key" without talking to each other.

use crate::constants::{KEY_BLOB_PREFIX, KEY_BLOB_TTL_GRACE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Index of an interval-wide window of Unix time
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Bucket(i64);

impl Bucket {
    /// Wrap a raw bucket number
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Bucket containing `since_epoch` for the given interval
    pub fn at(since_epoch: Duration, interval: Duration) -> Self {
        let width = interval_millis(interval);
        let bucket = since_epoch.as_millis() / width;
        Self(i64::try_from(bucket).unwrap_or(i64::MAX))
    }

    /// Time left until the next bucket boundary after `since_epoch`
    pub fn until_next_boundary(since_epoch: Duration, interval: Duration) -> Duration {
        let width = interval_millis(interval);
        let elapsed = since_epoch.as_millis() % width;
        let remaining = u64::try_from(width - elapsed).unwrap_or(u64::MAX);
        Duration::from_millis(remaining)
    }

    /// Raw bucket number
    pub const fn value(self) -> i64 {
        self.0
    }

    /// The bucket immediately before this one
    pub const fn previous(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// The bucket immediately after this one
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Name of the blob holding this bucket's signing key
    pub fn blob_name(self) -> String {
        format!("{KEY_BLOB_PREFIX}:{}", self.0)
    }

    /// Wall-clock start of the bucket
    pub fn starts_at(self, interval: Duration) -> Option<DateTime<Utc>> {
        let width = i64::try_from(interval_millis(interval)).ok()?;
        DateTime::<Utc>::from_timestamp_millis(self.0.checked_mul(width)?)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// TTL for a stored bucket key
///
/// A key signs for one interval and verifies for the next, so the blob must
/// survive both plus a small grace period for the restore lookback.
pub fn key_blob_ttl(interval: Duration) -> Duration {
    interval.saturating_mul(2).saturating_add(KEY_BLOB_TTL_GRACE)
}

fn interval_millis(interval: Duration) -> u128 {
    interval.as_millis().max(1)
}
