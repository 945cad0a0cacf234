//! Wall clock

use authkeys_domain::ports::infrastructure::Clock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// [`Clock`] backed by the operating system's real-time clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        // A clock set before 1970 reads as the epoch itself
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
    }
}
