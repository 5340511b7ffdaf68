//! Google Gemini provider.
//!
//! Authentication priority:
//! 1. Explicit API key passed in (config `api_key`)
//! 2. `GEMINI_API_KEY` environment variable
//! 3. `GOOGLE_API_KEY` environment variable
//!
//! The key travels in the `x-goog-api-key` header, never in the URL.

use crate::error::LlmError;
use crate::llm::traits::Provider;
use crate::llm::types::{ChatRole, ChatTurn};
use crate::utils::{build_http_client, sanitize_api_error};
use async_trait::async_trait;
use reqwest::Client;

mod types;
use types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MAX_OUTPUT_TOKENS: u32 = 8192;

pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: Option<&str>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, 120)
    }

    pub fn with_base_url(api_key: Option<&str>, base_url: &str, timeout_secs: u64) -> Self {
        let resolved_key = api_key
            .map(String::from)
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self {
            api_key: resolved_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_http_client(timeout_secs),
        }
    }

    /// Whether a key was resolved at construction time.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> anyhow::Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Gemini API key not found. Options:\n\
                 1. Set GEMINI_API_KEY env var\n\
                 2. Set api_key in ~/.pagepilot/config.toml\n\
                 3. Get an API key from https://aistudio.google.com/app/apikey"
            )
        })
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn build_request(turns: &[ChatTurn], temperature: f64) -> GenerateContentRequest {
        let contents = turns
            .iter()
            .map(|turn| Content {
                role: Some(
                    match turn.role {
                        ChatRole::User => "user",
                        ChatRole::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part {
                    text: Some(turn.text.clone()),
                }],
            })
            .collect();

        GenerateContentRequest {
            contents,
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }

    async fn ensure_success_status(
        response: reqwest::Response,
    ) -> anyhow::Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(LlmError::Auth {
                provider: "gemini".into(),
            }
            .into());
        }

        let error_text = response.text().await.unwrap_or_default();
        Err(LlmError::Request {
            provider: "gemini".into(),
            message: format!("{status}: {}", sanitize_api_error(&error_text)),
        }
        .into())
    }

    fn extract_text(result: &GenerateContentResponse) -> anyhow::Result<String> {
        if let Some(err) = result.error.as_ref() {
            anyhow::bail!(LlmError::Request {
                provider: "gemini".into(),
                message: sanitize_api_error(&err.message),
            });
        }

        let text = result
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                let mut out = String::new();
                for part in &content.parts {
                    if let Some(t) = &part.text {
                        if !out.is_empty() {
                            out.push('\n');
                        }
                        out.push_str(t);
                    }
                }
                out
            })
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!(LlmError::EmptyResponse {
                provider: "gemini".into(),
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn chat_turns(
        &self,
        turns: &[ChatTurn],
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<String> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            Self::model_name(model)
        );
        let request = Self::build_request(turns, temperature);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Request {
                provider: "gemini".into(),
                message: sanitize_api_error(&e.to_string()),
            })?;
        let response = Self::ensure_success_status(response).await?;
        let result: GenerateContentResponse = response.json().await?;

        Self::extract_text(&result)
    }
}
