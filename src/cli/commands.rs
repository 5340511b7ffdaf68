use clap::{Parser, Subcommand};

/// `PagePilot` - conversational assistant that publishes and schedules page posts.
#[derive(Parser, Debug)]
#[command(name = "pagepilot")]
#[command(version)]
#[command(about = "Chat with an assistant that writes, publishes and schedules page posts.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gateway for the browser client
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Handle one chat turn from the terminal
    Chat {
        /// The user message
        #[arg(short, long)]
        message: String,

        /// Page to publish to
        #[arg(long)]
        page_id: Option<String>,

        /// Page access token (falls back to `PAGEPILOT_PAGE_TOKEN`)
        #[arg(long)]
        page_token: Option<String>,
    },

    /// Show the effective configuration
    Status,
}
