use super::content::ContentGenerator;
use super::credential::{PublishCredential, usable};
use super::traits::{PublishResponse, Publisher};
use crate::scheduler::{ContentPolicy, ScheduledTask, TaskRunner};
use crate::utils::{log_preview, sanitize_api_error};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Why a publish did not go live.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishFailure {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl PublishFailure {
    pub fn missing_credential() -> Self {
        Self {
            error: "Missing page ID or access token".into(),
            details: None,
        }
    }

    pub fn generation_failed() -> Self {
        Self {
            error: "Failed to generate post content".into(),
            details: None,
        }
    }

    pub fn rejected(details: serde_json::Value) -> Self {
        Self {
            error: "Failed to post".into(),
            details: Some(details),
        }
    }

    pub fn transport(message: &str) -> Self {
        Self {
            error: "Failed to post".into(),
            details: Some(serde_json::Value::String(sanitize_api_error(message))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishOutcome {
    Published { post_id: String, message: String },
    Failed(PublishFailure),
}

impl PublishOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Generates and publishes posts for one publishing backend.
pub struct PostService {
    publisher: Arc<dyn Publisher>,
    generator: ContentGenerator,
}

impl PostService {
    pub fn new(publisher: Arc<dyn Publisher>, generator: ContentGenerator) -> Self {
        Self {
            publisher,
            generator,
        }
    }

    pub fn generator(&self) -> &ContentGenerator {
        &self.generator
    }

    /// Generate unique text and publish it. Exactly one publish attempt.
    pub async fn publish_generated(&self, credential: Option<&PublishCredential>) -> PublishOutcome {
        let Some(credential) = usable(credential) else {
            tracing::warn!("publish skipped: missing target id or access token");
            return PublishOutcome::Failed(PublishFailure::missing_credential());
        };

        match self.generator.generate_unique(Some(credential)).await {
            Some(text) => self.publish_frozen(Some(credential), &text).await,
            None => PublishOutcome::Failed(PublishFailure::generation_failed()),
        }
    }

    /// Publish text that was produced earlier.
    pub async fn publish_frozen(
        &self,
        credential: Option<&PublishCredential>,
        text: &str,
    ) -> PublishOutcome {
        let Some(credential) = usable(credential) else {
            return PublishOutcome::Failed(PublishFailure::missing_credential());
        };

        let result = self.publisher.publish_text(credential, text).await;
        self.finish(credential, text, result)
    }

    /// Publish a hosted image with a freshly generated caption.
    ///
    /// A caption that cannot be generated is left empty rather than failing
    /// the whole upload.
    pub async fn publish_photo(
        &self,
        credential: Option<&PublishCredential>,
        url: &str,
    ) -> PublishOutcome {
        let Some(credential) = usable(credential) else {
            return PublishOutcome::Failed(PublishFailure::missing_credential());
        };

        let caption = self
            .generator
            .generate_unique(Some(credential))
            .await
            .unwrap_or_default();
        let result = self.publisher.publish_photo(credential, url, &caption).await;
        self.finish(credential, &caption, result)
    }

    fn finish(
        &self,
        credential: &PublishCredential,
        text: &str,
        result: anyhow::Result<PublishResponse>,
    ) -> PublishOutcome {
        match result {
            Ok(PublishResponse::Accepted { id }) => {
                tracing::info!(
                    publisher = self.publisher.name(),
                    target_id = credential.target_id(),
                    post_id = %id,
                    message = %log_preview(text, 80),
                    "post published"
                );
                PublishOutcome::Published {
                    post_id: id,
                    message: text.to_string(),
                }
            }
            Ok(PublishResponse::Rejected { details }) => {
                tracing::error!(
                    publisher = self.publisher.name(),
                    target_id = credential.target_id(),
                    "publish rejected by backend"
                );
                PublishOutcome::Failed(PublishFailure::rejected(details))
            }
            Err(error) => {
                let message = format!("{error:#}");
                tracing::error!(
                    publisher = self.publisher.name(),
                    target_id = credential.target_id(),
                    error = %sanitize_api_error(&message),
                    "publish request failed"
                );
                PublishOutcome::Failed(PublishFailure::transport(&message))
            }
        }
    }
}

#[async_trait]
impl TaskRunner for PostService {
    async fn run(&self, task: ScheduledTask) -> anyhow::Result<()> {
        let outcome = match &task.content {
            ContentPolicy::Frozen(text) => self.publish_frozen(Some(&task.credential), text).await,
            ContentPolicy::RegenerateAtFire => self.publish_generated(Some(&task.credential)).await,
        };

        match outcome {
            PublishOutcome::Published { .. } => Ok(()),
            PublishOutcome::Failed(failure) => anyhow::bail!(
                "{}{}",
                failure.error,
                failure
                    .details
                    .map(|d| format!(": {d}"))
                    .unwrap_or_default()
            ),
        }
    }
}
