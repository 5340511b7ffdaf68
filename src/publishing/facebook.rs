//! Facebook Graph API publisher.
//!
//! Feed reads and text posts go through `/{version}/{page}/feed`, photos through
//! `/{version}/{page}/photos`. A response body carrying an `id` means the post
//! went live; anything else is handed back as rejection details.

use super::credential::PublishCredential;
use super::traits::{PostRecord, PublishResponse, Publisher};
use crate::config::PublishingConfig;
use crate::error::PublishError;
use crate::utils::{build_http_client, sanitize_api_error};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct FacebookPublisher {
    base_url: String,
    api_version: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct FeedPage {
    data: Option<Vec<PostRecord>>,
}

impl FacebookPublisher {
    pub fn new(base_url: &str, api_version: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: api_version.trim_matches('/').to_string(),
            client: build_http_client(REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &PublishingConfig) -> Self {
        Self::new(&config.graph_base_url, &config.graph_api_version)
    }

    fn edge_url(&self, target_id: &str, edge: &str) -> String {
        format!(
            "{}/{}/{}/{edge}",
            self.base_url, self.api_version, target_id
        )
    }

    async fn post_json(&self, url: String, body: Value) -> anyhow::Result<PublishResponse> {
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PublishError::Transport(sanitize_api_error(&e.to_string())))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Ok(interpret_publish_body(status, &text))
    }
}

fn interpret_publish_body(status: reqwest::StatusCode, text: &str) -> PublishResponse {
    let parsed: Option<Value> = serde_json::from_str(text).ok();
    if let Some(id) = parsed
        .as_ref()
        .and_then(|v| v.get("id"))
        .and_then(Value::as_str)
    {
        return PublishResponse::Accepted { id: id.to_string() };
    }

    tracing::warn!(
        status = status.as_u16(),
        body = %sanitize_api_error(text),
        "graph api rejected publish request"
    );
    let details = parsed.unwrap_or_else(|| {
        serde_json::json!({
            "status": status.as_u16(),
            "body": sanitize_api_error(text),
        })
    });
    PublishResponse::Rejected { details }
}

#[async_trait]
impl Publisher for FacebookPublisher {
    fn name(&self) -> &str {
        "facebook"
    }

    async fn list_posts(&self, credential: &PublishCredential) -> anyhow::Result<Vec<PostRecord>> {
        let response = self
            .client
            .get(self.edge_url(credential.target_id(), "feed"))
            .query(&[("access_token", credential.access_token())])
            .send()
            .await
            .map_err(|e| PublishError::Transport(sanitize_api_error(&e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(PublishError::Transport(format!(
                "feed request returned {status}: {}",
                sanitize_api_error(&body)
            )));
        }

        let page: FeedPage = response
            .json()
            .await
            .map_err(|e| PublishError::Malformed(e.to_string()))?;
        page.data
            .ok_or_else(|| PublishError::Malformed("feed response has no data array".into()).into())
    }

    async fn publish_text(
        &self,
        credential: &PublishCredential,
        text: &str,
    ) -> anyhow::Result<PublishResponse> {
        let body = serde_json::json!({
            "message": text,
            "access_token": credential.access_token(),
        });
        self.post_json(self.edge_url(credential.target_id(), "feed"), body)
            .await
    }

    async fn publish_photo(
        &self,
        credential: &PublishCredential,
        url: &str,
        caption: &str,
    ) -> anyhow::Result<PublishResponse> {
        let body = serde_json::json!({
            "url": url,
            "message": caption,
            "access_token": credential.access_token(),
        });
        self.post_json(self.edge_url(credential.target_id(), "photos"), body)
            .await
    }
}
