//! In-memory deferred execution of publish tasks.
//!
//! Each registered task gets its own tokio task that sleeps until the fire
//! time, runs once, and is dropped. Nothing survives a restart.

mod clock;
mod task;

pub use clock::{Clock, SystemClock};
pub use task::{ContentPolicy, ScheduleReceipt, ScheduledTask, TaskRunner};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use uuid::Uuid;

pub struct DeferredScheduler {
    runner: Arc<dyn TaskRunner>,
    clock: Arc<dyn Clock>,
    tracker: TaskTracker,
    cancel: CancellationToken,
    pending: Arc<AtomicUsize>,
}

impl DeferredScheduler {
    pub fn new(runner: Arc<dyn TaskRunner>) -> Self {
        Self::with_clock(runner, Arc::new(SystemClock))
    }

    pub fn with_clock(runner: Arc<dyn TaskRunner>, clock: Arc<dyn Clock>) -> Self {
        Self {
            runner,
            clock,
            tracker: TaskTracker::new(),
            cancel: CancellationToken::new(),
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Register a task and return immediately. Past fire times run right away.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, task: ScheduledTask) -> ScheduleReceipt {
        let receipt = ScheduleReceipt {
            task_id: Uuid::new_v4(),
            execute_at: task.execute_at,
        };
        let delay = (task.execute_at - self.clock.now())
            .to_std()
            .unwrap_or(Duration::ZERO);

        tracing::info!(
            task_id = %receipt.task_id,
            execute_at = %receipt.execute_at,
            target_id = task.credential.target_id(),
            delay_secs = delay.as_secs(),
            "scheduled deferred publish"
        );

        self.pending.fetch_add(1, Ordering::SeqCst);
        let runner = Arc::clone(&self.runner);
        let cancel = self.cancel.clone();
        let pending = Arc::clone(&self.pending);
        let task_id = receipt.task_id;

        self.tracker.spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!(task_id = %task_id, "deferred publish cancelled before firing");
                }
                () = tokio::time::sleep(delay) => {
                    let target_id = task.credential.target_id().to_string();
                    match runner.run(task).await {
                        Ok(()) => tracing::info!(
                            task_id = %task_id,
                            target_id = %target_id,
                            "deferred publish completed"
                        ),
                        Err(error) => tracing::error!(
                            task_id = %task_id,
                            target_id = %target_id,
                            error = %format!("{error:#}"),
                            "deferred publish failed"
                        ),
                    }
                }
            }
            pending.fetch_sub(1, Ordering::SeqCst);
        });

        receipt
    }

    /// Tasks registered but not yet finished.
    pub fn pending_count(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Let every registered task fire, then return.
    pub async fn wait(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Cancel all pending tasks and wait for in-flight ones to finish.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.tracker.close();
        self.tracker.wait().await;
    }
}
