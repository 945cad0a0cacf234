//! Shared fixtures for application tests

#![allow(dead_code)]

use async_trait::async_trait;
use authkeys_domain::error::{Error, Result};
use authkeys_domain::ports::infrastructure::{Clock, ErrorReporter};
use authkeys_domain::ports::providers::BlobStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Key size used throughout the tests
pub const TEST_KEY_BITS: usize = 1024;

/// Clock fixed at a settable Unix time
#[derive(Debug)]
pub struct ManualClock(Mutex<Duration>);

impl ManualClock {
    pub fn at_secs(secs: u64) -> Arc<Self> {
        Arc::new(Self(Mutex::new(Duration::from_secs(secs))))
    }

    pub fn set_secs(&self, secs: u64) {
        *self.0.lock().unwrap() = Duration::from_secs(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.0.lock().unwrap()
    }
}

/// Unix clock driven by tokio's (pausable) time plus a jumpable offset
#[derive(Debug)]
pub struct VirtualClock {
    origin: Instant,
    origin_unix: Duration,
    offset: Mutex<Duration>,
}

impl VirtualClock {
    pub fn at_secs(secs: u64) -> Arc<Self> {
        Arc::new(Self {
            origin: Instant::now(),
            origin_unix: Duration::from_secs(secs),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    /// Move wall-clock time forward without tokio time passing
    pub fn jump(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        self.origin_unix + *self.offset.lock().unwrap() + (Instant::now() - self.origin)
    }
}

/// Blob store wrapper whose operations can be made to fail
pub struct FlakyStore {
    inner: Arc<dyn BlobStore>,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: Arc<dyn BlobStore>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            failing: AtomicBool::new(false),
        })
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::storage("store unavailable"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for FlakyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlakyStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl BlobStore for FlakyStore {
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        self.check()?;
        self.inner.read(name).await
    }

    async fn write_nx(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<bool> {
        self.check()?;
        self.inner.write_nx(name, blob, ttl).await
    }

    async fn write(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<()> {
        self.check()?;
        self.inner.write(name, blob, ttl).await
    }

    fn provider_name(&self) -> &str {
        "flaky"
    }
}

/// Error reporter that keeps every message
#[derive(Debug, Default)]
pub struct RecordingReporter(Mutex<Vec<String>>);

impl RecordingReporter {
    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report_error(&self, error: &Error) {
        self.0.lock().unwrap().push(error.to_string());
    }
}
