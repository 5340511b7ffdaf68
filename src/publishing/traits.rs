use super::credential::PublishCredential;
use async_trait::async_trait;
use serde::Deserialize;

/// One entry of a target's published feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// What the backend said about a publish request that reached it.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishResponse {
    Accepted { id: String },
    Rejected { details: serde_json::Value },
}

/// Publishing backend. `Err` is reserved for transport-level failures;
/// a backend that answered but refused is `Ok(PublishResponse::Rejected)`.
#[async_trait]
pub trait Publisher: Send + Sync {
    fn name(&self) -> &str;

    async fn list_posts(&self, credential: &PublishCredential) -> anyhow::Result<Vec<PostRecord>>;

    async fn publish_text(
        &self,
        credential: &PublishCredential,
        text: &str,
    ) -> anyhow::Result<PublishResponse>;

    async fn publish_photo(
        &self,
        credential: &PublishCredential,
        url: &str,
        caption: &str,
    ) -> anyhow::Result<PublishResponse>;
}
