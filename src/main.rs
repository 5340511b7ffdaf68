use anyhow::Result;
use clap::Parser;
use pagepilot::Config;
use pagepilot::cli::commands::Cli;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install default crypto provider for Rustls TLS.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();
    let config = Config::load_or_init()?;
    pagepilot::observability::init_logging(&config.observability.log_level)?;

    pagepilot::app::dispatch::dispatch(cli, Arc::new(config)).await
}
