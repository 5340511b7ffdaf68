use chrono::{DateTime, Local};

/// Per-turn routing decision. Computed once, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentVerdict {
    Converse,
    PublishNow,
    PublishLater { scheduled_at: DateTime<Local> },
}

impl IntentVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Converse => "converse",
            Self::PublishNow => "publish_now",
            Self::PublishLater { .. } => "publish_later",
        }
    }
}
