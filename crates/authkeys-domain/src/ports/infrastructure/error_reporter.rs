//! Error Reporter Port
//!
//! Observability sink for failures that must not interrupt the caller, such as
//! a periodic key rotation that could not reach the backing store.

use crate::error::Error;

/// Sink for swallowed background errors
pub trait ErrorReporter: Send + Sync {
    /// Record an error that was handled by degrading instead of failing
    fn report_error(&self, error: &Error);
}
