use super::types::ChatTurn;
use async_trait::async_trait;

/// Remote text-generation backend used for both classification and replies.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "gemini").
    fn name(&self) -> &str;

    /// Single blocking generation call over an ordered turn list.
    async fn chat_turns(
        &self,
        turns: &[ChatTurn],
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<String>;
}
