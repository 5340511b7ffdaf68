use super::credential::{PublishCredential, usable};
use super::history::UniquenessOracle;
use crate::intent::ClassifierGateway;
use crate::llm::ChatTurn;
use crate::utils::{log_preview, sanitize_api_error};
use std::sync::Arc;

/// Prompt asking for a short post that differs from every history entry.
pub fn unique_post_prompt(business: &str, history: &[String]) -> String {
    format!(
        "Give me a clear, short sentence to post on a Facebook page for {business} \
         that is different from these existing sentences: \"{}\"",
        history.join("\", \"")
    )
}

/// Produces post text that avoids what the target already published.
pub struct ContentGenerator {
    oracle: UniquenessOracle,
    classifier: Arc<ClassifierGateway>,
    business_description: String,
}

impl ContentGenerator {
    pub fn new(
        oracle: UniquenessOracle,
        classifier: Arc<ClassifierGateway>,
        business_description: impl Into<String>,
    ) -> Self {
        Self {
            oracle,
            classifier,
            business_description: business_description.into(),
        }
    }

    /// One generation attempt seeded with fresh history. `None` on any failure.
    ///
    /// The result is not compared against history afterwards; uniqueness is
    /// only requested from the model.
    pub async fn generate_unique(&self, credential: Option<&PublishCredential>) -> Option<String> {
        let Some(credential) = usable(credential) else {
            tracing::warn!("content generation skipped: missing target id or access token");
            return None;
        };

        let history = self.oracle.collect_history(Some(credential)).await;
        let prompt = unique_post_prompt(&self.business_description, &history);

        match self.classifier.try_generate(&[ChatTurn::user(prompt)]).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::warn!(target_id = credential.target_id(), "generated content was empty");
                    return None;
                }
                tracing::info!(
                    target_id = credential.target_id(),
                    history_len = history.len(),
                    content = %log_preview(text, 80),
                    "generated unique post content"
                );
                Some(text.to_string())
            }
            Err(error) => {
                tracing::warn!(
                    target_id = credential.target_id(),
                    error = %sanitize_api_error(&format!("{error:#}")),
                    "content generation failed"
                );
                None
            }
        }
    }
}
