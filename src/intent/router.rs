use super::classifier::ClassifierGateway;
use super::prompts::{PUBLISH_LATER_QUESTION, PUBLISH_NOW_QUESTION};
use super::schedule_time::parse_schedule_time;
use super::verdict::IntentVerdict;
use crate::config::ContentPolicyMode;
use crate::error::TurnError;
use crate::llm::{ChatTurn, last_user_text};
use crate::publishing::{PostService, PublishCredential, PublishOutcome};
use crate::scheduler::{ContentPolicy, DeferredScheduler, ScheduleReceipt, ScheduledTask};
use crate::utils::log_preview;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// Reply used when the backend produced no conversational text.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your message right now.";

/// What a single chat turn produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Ordinary conversational reply.
    Replied { reply: String },
    /// Immediate publish attempt; no conversational reply.
    Published(PublishOutcome),
    /// Publish deferred (when `receipt` is set) plus a conversational reply.
    Scheduled {
        reply: String,
        scheduled_at: DateTime<Local>,
        receipt: Option<ScheduleReceipt>,
    },
}

/// Decides per turn between conversation, an immediate publish and a
/// deferred one. First match wins: publish-now, then publish-later, then
/// conversation.
pub struct IntentRouter {
    classifier: Arc<ClassifierGateway>,
    posts: Arc<PostService>,
    scheduler: Arc<DeferredScheduler>,
    content_policy: ContentPolicyMode,
}

impl IntentRouter {
    pub fn new(
        classifier: Arc<ClassifierGateway>,
        posts: Arc<PostService>,
        scheduler: Arc<DeferredScheduler>,
        content_policy: ContentPolicyMode,
    ) -> Self {
        Self {
            classifier,
            posts,
            scheduler,
            content_policy,
        }
    }

    pub fn scheduler(&self) -> &DeferredScheduler {
        &self.scheduler
    }

    pub async fn route(
        &self,
        turns: &[ChatTurn],
        credential: Option<&PublishCredential>,
    ) -> Result<TurnOutcome, TurnError> {
        let message = last_user_text(turns)
            .filter(|text| !text.trim().is_empty())
            .ok_or(TurnError::NoUserMessage)?;

        let verdict = self.classify(message).await;
        tracing::info!(
            verdict = verdict.label(),
            message = %log_preview(message, 60),
            "routed chat turn"
        );

        match verdict {
            IntentVerdict::PublishNow => Ok(TurnOutcome::Published(
                self.posts.publish_generated(credential).await,
            )),
            IntentVerdict::PublishLater { scheduled_at } => {
                let receipt = self.register(scheduled_at, credential).await;
                Ok(TurnOutcome::Scheduled {
                    reply: self.reply(turns).await,
                    scheduled_at,
                    receipt,
                })
            }
            IntentVerdict::Converse => Ok(TurnOutcome::Replied {
                reply: self.reply(turns).await,
            }),
        }
    }

    /// At most two classifier calls, in precedence order.
    pub async fn classify(&self, message: &str) -> IntentVerdict {
        if self
            .classifier
            .classify_flag(PUBLISH_NOW_QUESTION, message)
            .await
        {
            return IntentVerdict::PublishNow;
        }

        let Some(candidate) = self
            .classifier
            .classify_date(PUBLISH_LATER_QUESTION, message)
            .await
        else {
            return IntentVerdict::Converse;
        };

        match parse_schedule_time(&candidate) {
            Ok(scheduled_at) => IntentVerdict::PublishLater { scheduled_at },
            Err(error) => {
                tracing::warn!(%error, "ignoring unparseable schedule time");
                IntentVerdict::Converse
            }
        }
    }

    async fn register(
        &self,
        execute_at: DateTime<Local>,
        credential: Option<&PublishCredential>,
    ) -> Option<ScheduleReceipt> {
        let Some(credential) = credential.filter(|c| c.is_complete()) else {
            tracing::warn!(%execute_at, "not scheduling: missing target id or access token");
            return None;
        };

        let content = match self.content_policy {
            ContentPolicyMode::Frozen => {
                let Some(text) = self.posts.generator().generate_unique(Some(credential)).await
                else {
                    tracing::warn!(
                        %execute_at,
                        target_id = credential.target_id(),
                        "not scheduling: content generation failed"
                    );
                    return None;
                };
                ContentPolicy::Frozen(text)
            }
            ContentPolicyMode::Regenerate => ContentPolicy::RegenerateAtFire,
        };

        Some(self.scheduler.schedule(ScheduledTask {
            execute_at,
            credential: credential.clone(),
            content,
        }))
    }

    async fn reply(&self, turns: &[ChatTurn]) -> String {
        let reply = self.classifier.generate(turns).await;
        if reply.trim().is_empty() {
            FALLBACK_REPLY.to_string()
        } else {
            reply
        }
    }
}
