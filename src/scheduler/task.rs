use crate::publishing::PublishCredential;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use uuid::Uuid;

/// Where a scheduled publish gets its text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPolicy {
    /// Text generated when the task was registered.
    Frozen(String),
    /// Generate against the history visible at fire time.
    RegenerateAtFire,
}

/// A one-shot deferred publish. Holds its own credential snapshot.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub execute_at: DateTime<Local>,
    pub credential: PublishCredential,
    pub content: ContentPolicy,
}

/// Handle returned once a task is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleReceipt {
    pub task_id: Uuid,
    pub execute_at: DateTime<Local>,
}

/// Executes a task when its time arrives. One call per task, never retried.
#[async_trait]
pub trait TaskRunner: Send + Sync {
    async fn run(&self, task: ScheduledTask) -> anyhow::Result<()>;
}
