//! Epoch-aligned interval ticker
//!
//! Emits bucket numbers at boundaries aligned to absolute Unix time rather
//! than to process start, so unrelated processes configured with the same
//! interval tick in lockstep without talking to each other.
//!
//! The ticker wakes at least every [`TICKER_MAX_SLEEP`] so a clock jump (for
//! example after a suspend) is noticed promptly. After such a jump only the
//! latest bucket is emitted; missed buckets are never replayed.

use authkeys_domain::constants::TICKER_MAX_SLEEP;
use authkeys_domain::ports::infrastructure::Clock;
use authkeys_domain::value_objects::Bucket;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Receiver side of a running ticker
///
/// Dropping the ticker stops its background task.
#[derive(Debug)]
pub struct EpochIntervalTicker {
    receiver: mpsc::Receiver<Bucket>,
    initial: Bucket,
    task: JoinHandle<()>,
}

impl EpochIntervalTicker {
    /// Start a ticker whose last reported bucket is the current one
    pub fn start(clock: Arc<dyn Clock>, interval: Duration, cancel: CancellationToken) -> Self {
        let initial = Bucket::at(clock.now(), interval);
        Self::starting_at(clock, interval, initial, cancel)
    }

    /// Start a ticker that treats `last` as already reported
    ///
    /// If the clock has moved past `last` by the time the task runs, the
    /// current bucket is emitted immediately.
    pub fn starting_at(
        clock: Arc<dyn Clock>,
        interval: Duration,
        last: Bucket,
        cancel: CancellationToken,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(1);
        let task = tokio::spawn(run_ticker(clock, interval, last, sender, cancel));
        Self {
            receiver,
            initial: last,
            task,
        }
    }

    /// Wait for the next bucket transition
    ///
    /// # Returns
    /// `None` once the ticker has been cancelled
    pub async fn tick(&mut self) -> Option<Bucket> {
        self.receiver.recv().await
    }

    /// The bucket the ticker considered already reported when it started
    pub fn initial_bucket(&self) -> Bucket {
        self.initial
    }
}

impl Drop for EpochIntervalTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_ticker(
    clock: Arc<dyn Clock>,
    interval: Duration,
    mut last: Bucket,
    sender: mpsc::Sender<Bucket>,
    cancel: CancellationToken,
) {
    loop {
        let now = clock.now();
        let bucket = Bucket::at(now, interval);
        if bucket > last {
            debug!(bucket = bucket.value(), previous = last.value(), "Epoch bucket advanced");
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                sent = sender.send(bucket) => {
                    if sent.is_err() {
                        break;
                    }
                }
            }
            last = bucket;
        }

        let sleep = Bucket::until_next_boundary(clock.now(), interval).min(TICKER_MAX_SLEEP);
        trace!(sleep_ms = sleep.as_millis(), "Ticker sleeping");
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(sleep) => {}
        }
    }
    debug!("Epoch ticker stopped");
}
