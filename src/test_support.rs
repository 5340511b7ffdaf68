//! In-process doubles shared by unit tests.

use crate::llm::{ChatTurn, Provider};
use crate::publishing::{PostRecord, PublishCredential, PublishResponse, Publisher};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type CallLog = Arc<Mutex<Vec<Vec<ChatTurn>>>>;

/// Answers by the first rule whose needle appears in the last turn.
pub struct ScriptedProvider {
    rules: Vec<(String, String)>,
    default_reply: Option<String>,
    delay: Option<Duration>,
    calls: CallLog,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default_reply: Some("false".into()),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call fails.
    pub fn failing() -> Self {
        Self {
            default_reply: None,
            ..Self::new()
        }
    }

    pub fn on(mut self, needle: &str, reply: &str) -> Self {
        self.rules.push((needle.to_string(), reply.to_string()));
        self
    }

    pub fn otherwise(mut self, reply: &str) -> Self {
        self.default_reply = Some(reply.to_string());
        self
    }

    /// Sleep (on tokio's clock) before every answer.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat_turns(
        &self,
        turns: &[ChatTurn],
        _model: &str,
        _temperature: f64,
    ) -> anyhow::Result<String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().push(turns.to_vec());
        let last = turns.last().map(|t| t.text.as_str()).unwrap_or_default();
        if let Some((_, reply)) = self.rules.iter().find(|(needle, _)| last.contains(needle)) {
            return Ok(reply.clone());
        }
        self.default_reply
            .clone()
            .ok_or_else(|| anyhow::anyhow!("scripted provider failure"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishCall {
    Text { target_id: String, text: String },
    Photo {
        target_id: String,
        url: String,
        caption: String,
    },
}

/// Publisher double that records every call.
pub struct RecordingPublisher {
    pub feed: Vec<PostRecord>,
    pub fail_list: bool,
    pub reject: bool,
    pub list_calls: Mutex<usize>,
    pub published: Arc<Mutex<Vec<PublishCall>>>,
}

impl RecordingPublisher {
    pub fn with_feed(messages: &[&str]) -> Self {
        Self {
            feed: messages
                .iter()
                .enumerate()
                .map(|(i, m)| PostRecord {
                    id: Some(format!("post_{i}")),
                    message: Some((*m).to_string()),
                })
                .collect(),
            fail_list: false,
            reject: false,
            list_calls: Mutex::new(0),
            published: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn respond(&self, call: PublishCall) -> PublishResponse {
        let mut published = self.published.lock().unwrap();
        published.push(call);
        if self.reject {
            PublishResponse::Rejected {
                details: serde_json::json!({"error": {"message": "rejected"}}),
            }
        } else {
            PublishResponse::Accepted {
                id: format!("page_{}", published.len()),
            }
        }
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    fn name(&self) -> &str {
        "recording"
    }

    async fn list_posts(&self, _credential: &PublishCredential) -> anyhow::Result<Vec<PostRecord>> {
        *self.list_calls.lock().unwrap() += 1;
        if self.fail_list {
            anyhow::bail!("feed unavailable");
        }
        Ok(self.feed.clone())
    }

    async fn publish_text(
        &self,
        credential: &PublishCredential,
        text: &str,
    ) -> anyhow::Result<PublishResponse> {
        Ok(self.respond(PublishCall::Text {
            target_id: credential.target_id().to_string(),
            text: text.to_string(),
        }))
    }

    async fn publish_photo(
        &self,
        credential: &PublishCredential,
        url: &str,
        caption: &str,
    ) -> anyhow::Result<PublishResponse> {
        Ok(self.respond(PublishCall::Photo {
            target_id: credential.target_id().to_string(),
            url: url.to_string(),
            caption: caption.to_string(),
        }))
    }
}

pub fn credential() -> PublishCredential {
    PublishCredential::new("page-1", "token-1")
}
