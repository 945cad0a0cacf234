//! Error reporting sink backed by tracing

use authkeys_domain::error::Error;
use authkeys_domain::ports::infrastructure::ErrorReporter;
use tracing::error;

/// Reports swallowed background errors as `error`-level events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report_error(&self, error: &Error) {
        error!(
            error = %error,
            integrity_failure = error.is_integrity_failure(),
            "Background key maintenance failed"
        );
    }
}
