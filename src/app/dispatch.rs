use crate::cli::commands::{Cli, Commands};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::Config;
use crate::app::runtime::PilotRuntime;
use crate::app::status::render_status;
use crate::intent::{SCHEDULE_FORMAT, TurnOutcome};
use crate::llm::ChatTurn;
use crate::publishing::{PublishCredential, PublishOutcome};

fn resolve_credential(
    page_id: Option<String>,
    page_token: Option<String>,
) -> Option<PublishCredential> {
    let token = page_token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| std::env::var("PAGEPILOT_PAGE_TOKEN").ok())?;
    let page_id = page_id?;
    Some(PublishCredential::new(page_id.trim(), token.trim()))
}

fn render_outcome(outcome: &TurnOutcome) -> String {
    match outcome {
        TurnOutcome::Replied { reply } => reply.clone(),
        TurnOutcome::Published(PublishOutcome::Published { message, .. }) => {
            format!("Post uploaded successfully! Message: {message}")
        }
        TurnOutcome::Published(PublishOutcome::Failed(failure)) => match &failure.details {
            Some(details) => format!("Post upload failed! {}: {details}", failure.error),
            None => format!("Post upload failed! {}", failure.error),
        },
        TurnOutcome::Scheduled {
            reply,
            scheduled_at,
            receipt,
        } => {
            let when = scheduled_at.format(SCHEDULE_FORMAT);
            match receipt {
                Some(_) => format!("{reply}\n(post scheduled for {when})"),
                None => format!("{reply}\n(could not schedule a post for {when})"),
            }
        }
    }
}

/// Handle one turn from the terminal. Waits for a scheduled post to fire
/// before returning, since nothing outlives the process.
async fn run_chat(config: &Config, message: String, credential: Option<PublishCredential>) -> Result<()> {
    let runtime = PilotRuntime::from_config(config);
    let outcome = runtime
        .router
        .route(&[ChatTurn::user(message)], credential.as_ref())
        .await?;

    println!("{}", render_outcome(&outcome));

    if let TurnOutcome::Scheduled {
        receipt: Some(receipt),
        ..
    } = &outcome
    {
        info!(
            task_id = %receipt.task_id,
            execute_at = %receipt.execute_at,
            "waiting for scheduled post; press Ctrl-C to cancel"
        );
        tokio::select! {
            () = runtime.scheduler.wait() => {}
            _ = tokio::signal::ctrl_c() => {
                runtime.scheduler.shutdown().await;
                println!("Scheduled post cancelled.");
            }
        }
    }
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Arc<Config>) -> Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.gateway.port);
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            if port == 0 {
                info!("Starting PagePilot gateway on {host} (random port)");
            } else {
                info!("Starting PagePilot gateway on {host}:{port}");
            }
            crate::transport::gateway::run_gateway(&host, port, Arc::clone(&config)).await
        }

        Commands::Chat {
            message,
            page_id,
            page_token,
        } => run_chat(&config, message, resolve_credential(page_id, page_token)).await,

        Commands::Status => {
            println!("{}", render_status(&config));
            Ok(())
        }
    }
}
