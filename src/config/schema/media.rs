use serde::{Deserialize, Serialize};

/// Cloudinary upload settings. All three credentials are required before
/// `/chat/upload` accepts files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_media_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub cloud_name: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

fn default_media_base_url() -> String {
    "https://api.cloudinary.com".into()
}

fn default_max_file_size_mb() -> u64 {
    10
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: default_media_base_url(),
            cloud_name: None,
            api_key: None,
            api_secret: None,
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}
