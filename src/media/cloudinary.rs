//! Cloudinary-backed image hosting.
//!
//! Uploads are signed: the sorted upload parameters are joined as
//! `k=v&k=v`, the API secret is appended, and the SHA-256 hex digest is sent
//! with `signature_algorithm=sha256`.

use super::BinaryStore;
use super::detection::detect_image_mime;
use crate::config::MediaConfig;
use crate::error::MediaError;
use crate::utils::{build_http_client, sanitize_api_error};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

const UPLOAD_TIMEOUT_SECS: u64 = 60;

pub struct CloudinaryStore {
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: Zeroizing<String>,
    max_file_size: u64,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: Option<String>,
    secure_url: Option<String>,
}

fn required(value: Option<&String>, field: &'static str) -> Result<String, MediaError> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
        .ok_or(MediaError::NotConfigured(field))
}

/// Hex SHA-256 over the sorted parameter string plus the API secret.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

impl CloudinaryStore {
    pub fn from_config(config: &MediaConfig) -> Result<Self, MediaError> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cloud_name: required(config.cloud_name.as_ref(), "cloud_name")?,
            api_key: required(config.api_key.as_ref(), "api_key")?,
            api_secret: Zeroizing::new(required(config.api_secret.as_ref(), "api_secret")?),
            max_file_size: config.max_file_size_mb.saturating_mul(1_024 * 1_024),
            client: build_http_client(UPLOAD_TIMEOUT_SECS),
        })
    }

    fn upload_url(&self) -> String {
        format!("{}/v1_1/{}/image/upload", self.base_url, self.cloud_name)
    }

    async fn upload(&self, bytes: Vec<u8>, filename: Option<&str>) -> Result<String, MediaError> {
        let size = bytes.len() as u64;
        if size > self.max_file_size {
            return Err(MediaError::TooLarge {
                size,
                max: self.max_file_size,
            });
        }
        let mime = detect_image_mime(&bytes, filename).ok_or_else(|| {
            MediaError::Unsupported(filename.unwrap_or("unnamed upload").to_string())
        })?;

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(&[("timestamp", timestamp.as_str())], &self.api_secret);

        let file = Part::bytes(bytes)
            .file_name(filename.unwrap_or("upload").to_string())
            .mime_str(mime)
            .map_err(|e| MediaError::Upload(e.to_string()))?;
        let form = Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Upload(sanitize_api_error(&e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Upload(format!(
                "{status}: {}",
                sanitize_api_error(&body)
            )));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Upload(format!("malformed upload response: {e}")))?;
        parsed
            .url
            .or(parsed.secure_url)
            .ok_or_else(|| MediaError::Upload("upload response has no url".into()))
    }
}

#[async_trait]
impl BinaryStore for CloudinaryStore {
    fn name(&self) -> &str {
        "cloudinary"
    }

    async fn store(&self, bytes: Vec<u8>, filename: Option<&str>) -> anyhow::Result<String> {
        let url = self.upload(bytes, filename).await?;
        tracing::info!(store = self.name(), url = %url, "stored upload");
        Ok(url)
    }
}
