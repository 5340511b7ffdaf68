use super::credential::{PublishCredential, usable};
use super::traits::Publisher;
use crate::utils::sanitize_api_error;
use std::sync::Arc;

/// Reads what a target has already published so new content can avoid it.
pub struct UniquenessOracle {
    publisher: Arc<dyn Publisher>,
}

impl UniquenessOracle {
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self { publisher }
    }

    /// Message texts of the target's feed, in backend order.
    ///
    /// Never fails: a missing credential, a backend error and an empty feed
    /// all come back as an empty list.
    pub async fn collect_history(&self, credential: Option<&PublishCredential>) -> Vec<String> {
        let Some(credential) = usable(credential) else {
            tracing::debug!("no usable credential; skipping history lookup");
            return Vec::new();
        };

        match self.publisher.list_posts(credential).await {
            Ok(posts) => posts.into_iter().filter_map(|post| post.message).collect(),
            Err(error) => {
                tracing::warn!(
                    target_id = credential.target_id(),
                    error = %sanitize_api_error(&format!("{error:#}")),
                    "failed to fetch publish history"
                );
                Vec::new()
            }
        }
    }
}
