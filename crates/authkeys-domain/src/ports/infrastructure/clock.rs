//! Clock Port

use std::time::Duration;

/// Source of wall-clock time
///
/// Bucket math only depends on this, which keeps the epoch ticker testable
/// under virtual time.
pub trait Clock: Send + Sync {
    /// Time elapsed since the Unix epoch
    fn now(&self) -> Duration;
}
