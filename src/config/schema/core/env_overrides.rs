use super::Config;

fn non_empty_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_env(&["PAGEPILOT_API_KEY", "GEMINI_API_KEY"]) {
            self.api_key = Some(key);
        }

        if let Some(model) = non_empty_env(&["PAGEPILOT_MODEL"]) {
            self.default_model = model;
        }

        if let Some(temp_str) = non_empty_env(&["PAGEPILOT_TEMPERATURE"])
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.default_temperature = temp;
        }

        if let Some(port_str) = non_empty_env(&["PAGEPILOT_GATEWAY_PORT", "PORT"])
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Some(host) = non_empty_env(&["PAGEPILOT_GATEWAY_HOST", "HOST"]) {
            self.gateway.host = host;
        }

        if let Some(cloud_name) = non_empty_env(&["CLOUDINARY_CLOUD_NAME"]) {
            self.media.cloud_name = Some(cloud_name);
        }

        if let Some(api_key) = non_empty_env(&["CLOUDINARY_API_KEY"]) {
            self.media.api_key = Some(api_key);
        }

        if let Some(api_secret) = non_empty_env(&["CLOUDINARY_API_SECRET"]) {
            self.media.api_secret = Some(api_secret);
        }

        if let Some(level) = non_empty_env(&["PAGEPILOT_LOG_LEVEL"]) {
            self.observability.log_level = level;
        }
    }
}
