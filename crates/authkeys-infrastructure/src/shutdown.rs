//! Background task lifecycle
//!
//! Owns the root [`CancellationToken`] handed (as child tokens) to the key
//! rotation loop, and a [`TaskTracker`] so shutdown can wait for that loop
//! to observe cancellation and return.
//!
//! ```rust,ignore
//! let coordinator = ShutdownCoordinator::new();
//! let task = rotater.maintain(keys, reporter, coordinator.child_token()).await?;
//! coordinator.spawn("key-rotation", task.run());
//!
//! let clean = coordinator.shutdown(SHUTDOWN_TIMEOUT).await;
//! ```

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Cancellation and tracking for background tasks
#[derive(Debug, Clone, Default)]
pub struct ShutdownCoordinator {
    cancel_token: CancellationToken,
    task_tracker: TaskTracker,
}

impl ShutdownCoordinator {
    /// Create a coordinator with no tasks
    pub fn new() -> Self {
        Self::default()
    }

    /// A token cancelled when shutdown starts
    pub fn child_token(&self) -> CancellationToken {
        self.cancel_token.child_token()
    }

    /// Whether shutdown has started
    pub fn is_shutting_down(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Number of tracked tasks still running
    pub fn active_tasks(&self) -> usize {
        self.task_tracker.len()
    }

    /// Spawn `future` and track it until it completes
    pub fn spawn<F>(&self, name: &'static str, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        debug!(task = name, "Spawning tracked task");
        self.task_tracker.spawn(future)
    }

    /// Cancel every token, then wait up to `timeout` for tracked tasks
    ///
    /// Returns `true` if all tasks finished in time. Idempotent.
    pub async fn shutdown(&self, timeout: Duration) -> bool {
        info!(
            timeout_secs = timeout.as_secs(),
            active_tasks = self.task_tracker.len(),
            "Initiating shutdown"
        );

        self.cancel_token.cancel();
        self.task_tracker.close();

        tokio::select! {
            () = self.task_tracker.wait() => {
                info!("All background tasks stopped");
                true
            }
            () = tokio::time::sleep(timeout) => {
                warn!(
                    active_tasks = self.task_tracker.len(),
                    "Shutdown timed out"
                );
                false
            }
        }
    }

    /// Wait until shutdown starts
    pub async fn wait_for_shutdown(&self) {
        self.cancel_token.cancelled().await;
    }
}
