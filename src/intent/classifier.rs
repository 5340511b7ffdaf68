use super::prompts::{date_prompt, flag_prompt};
use crate::llm::{ChatTurn, Provider};
use crate::utils::{log_preview, sanitize_api_error};
use std::sync::Arc;

/// Verdict substituted when the backend cannot answer a classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassifierFallback {
    /// Treat the question as answered "no".
    #[default]
    Negative,
}

impl ClassifierFallback {
    fn flag(self) -> bool {
        match self {
            Self::Negative => false,
        }
    }

    fn date(self) -> Option<String> {
        match self {
            Self::Negative => None,
        }
    }
}

/// Turns yes/no and date questions into single generation calls.
pub struct ClassifierGateway {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f64,
    fallback: ClassifierFallback,
}

impl ClassifierGateway {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            fallback: ClassifierFallback::default(),
        }
    }

    /// `true` only when the backend answers the literal `true`.
    pub async fn classify_flag(&self, question: &str, message: &str) -> bool {
        let prompt = flag_prompt(question, message);
        match self.try_generate(&[ChatTurn::user(prompt)]).await {
            Ok(answer) => normalize_flag(&answer),
            Err(error) => {
                tracing::warn!(
                    question,
                    error = %sanitize_api_error(&format!("{error:#}")),
                    "flag classification failed; using fallback"
                );
                self.fallback.flag()
            }
        }
    }

    /// Candidate timestamp string, unvalidated. `None` means "no".
    pub async fn classify_date(&self, question: &str, message: &str) -> Option<String> {
        let prompt = date_prompt(question, message);
        match self.try_generate(&[ChatTurn::user(prompt)]).await {
            Ok(answer) => normalize_date(&answer),
            Err(error) => {
                tracing::warn!(
                    question,
                    error = %sanitize_api_error(&format!("{error:#}")),
                    "date classification failed; using fallback"
                );
                self.fallback.date()
            }
        }
    }

    /// Reply text for the turn list, or an empty string when the backend fails.
    pub async fn generate(&self, turns: &[ChatTurn]) -> String {
        match self.try_generate(turns).await {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(
                    error = %sanitize_api_error(&format!("{error:#}")),
                    "reply generation failed"
                );
                String::new()
            }
        }
    }

    pub async fn try_generate(&self, turns: &[ChatTurn]) -> anyhow::Result<String> {
        let text = self
            .provider
            .chat_turns(turns, &self.model, self.temperature)
            .await?;
        tracing::debug!(
            provider = self.provider.name(),
            answer = %log_preview(&text, 80),
            "generation completed"
        );
        Ok(text)
    }
}

fn normalize_flag(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("true")
}

fn normalize_date(answer: &str) -> Option<String> {
    let trimmed = answer.trim();
    if trimmed.eq_ignore_ascii_case("false") {
        None
    } else {
        Some(trimmed.to_string())
    }
}
