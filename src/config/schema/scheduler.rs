use serde::{Deserialize, Serialize};

/// When the text of a deferred post is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentPolicyMode {
    /// Generate once while handling the scheduling turn.
    #[default]
    Frozen,
    /// Generate against the feed as it looks when the task fires.
    Regenerate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub content_policy: ContentPolicyMode,
}
