use crate::config::Config;

fn configured(value: Option<&String>) -> &'static str {
    if value.is_some_and(|v| !v.trim().is_empty()) {
        "set"
    } else {
        "missing"
    }
}

pub fn render_status(config: &Config) -> String {
    let media_ready = [
        config.media.cloud_name.as_ref(),
        config.media.api_key.as_ref(),
        config.media.api_secret.as_ref(),
    ]
    .into_iter()
    .all(|v| configured(v) == "set");

    let lines = [
        "◆ PagePilot status".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        String::new(),
        format!("  Model       {}", config.default_model),
        format!("  Temperature {:.2}", config.default_temperature),
        format!("  API key     {}", configured(config.api_key.as_ref())),
        format!(
            "  Graph API   {}/{}",
            config.publishing.graph_base_url, config.publishing.graph_api_version
        ),
        format!("  Business    {}", config.publishing.business_description),
        format!(
            "  Uploads     {}",
            if media_ready {
                "enabled"
            } else {
                "disabled"
            }
        ),
        format!("  Scheduling  content={}", config.scheduler.content_policy),
        format!(
            "  Gateway     {}:{} (public bind {})",
            config.gateway.host,
            config.gateway.port,
            if config.gateway.allow_public_bind {
                "allowed"
            } else {
                "refused"
            }
        ),
        format!("  Log level   {}", config.observability.log_level),
    ];
    lines.join("\n")
}
