use super::super::{
    GatewayConfig, LlmConfig, MediaConfig, ObservabilityConfig, PublishingConfig,
    SchedulerConfig,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Gemini API key; falls back to `GEMINI_API_KEY` / `GOOGLE_API_KEY`
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub publishing: PublishingConfig,

    #[serde(default)]
    pub media: MediaConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

fn default_model() -> String {
    "gemini-1.5-flash".into()
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            default_model: default_model(),
            default_temperature: default_temperature(),
            observability: ObservabilityConfig::default(),
            llm: LlmConfig::default(),
            gateway: GatewayConfig::default(),
            publishing: PublishingConfig::default(),
            media: MediaConfig::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.default_temperature) {
            return Err(ConfigError::Validation(format!(
                "default_temperature must be within 0.0..=2.0, got {}",
                self.default_temperature
            )));
        }

        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "observability.log_level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.observability.log_level
            )));
        }

        if self.publishing.graph_api_version.trim().is_empty() {
            return Err(ConfigError::Validation(
                "publishing.graph_api_version must not be empty".into(),
            ));
        }

        Ok(())
    }
}
