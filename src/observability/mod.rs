//! Process-wide logging setup.

use anyhow::Context;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Map a config log level to a `tracing` level. Unknown values mean `info`.
pub fn parse_level(level: &str) -> Level {
    match level.trim().to_ascii_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Install the global fmt subscriber. Call once, before any work starts.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(level))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("set global tracing subscriber")
}
