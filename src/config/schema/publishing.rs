use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishingConfig {
    /// Graph API root (overridable for tests and proxies)
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,
    /// Graph API version segment, e.g. `v22.0`
    #[serde(default = "default_graph_api_version")]
    pub graph_api_version: String,
    /// Who the generated posts speak for
    #[serde(default = "default_business_description")]
    pub business_description: String,
}

fn default_graph_base_url() -> String {
    "https://graph.facebook.com".into()
}

fn default_graph_api_version() -> String {
    "v22.0".into()
}

fn default_business_description() -> String {
    "a coffee business".into()
}

impl Default for PublishingConfig {
    fn default() -> Self {
        Self {
            graph_base_url: default_graph_base_url(),
            graph_api_version: default_graph_api_version(),
            business_description: default_business_description(),
        }
    }
}
