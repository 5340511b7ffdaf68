use super::handlers::{
    handle_chat, handle_check_session, handle_health, handle_page_data, handle_upload,
};
use super::session::SessionStore;
use super::{AppState, MAX_BODY_SIZE, REQUEST_TIMEOUT_SECS, UPLOAD_OVERHEAD_BYTES};

use crate::app::runtime::PilotRuntime;
use crate::config::Config;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Returns true when the bind address is not a loopback address.
fn is_public_bind(host: &str) -> bool {
    !matches!(
        host,
        "127.0.0.1" | "localhost" | "::1" | "[::1]" | "0:0:0:0:0:0:0:1"
    )
}

/// Run the HTTP gateway until Ctrl-C, then cancel pending scheduled posts.
pub async fn run_gateway(host: &str, port: u16, config: Arc<Config>) -> Result<()> {
    if is_public_bind(host) && !config.gateway.allow_public_bind {
        anyhow::bail!(
            "Refusing to bind to {host}: the gateway holds page access tokens in memory.\n\
             Fix: use --host 127.0.0.1 (default) behind a reverse proxy, or set\n\
             [gateway] allow_public_bind = true in config.toml."
        );
    }

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("parse gateway bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind gateway socket")?;

    run_gateway_with_listener(listener, config).await
}

/// Run the HTTP gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    config: Arc<Config>,
) -> Result<()> {
    let local_addr = listener
        .local_addr()
        .context("get gateway listener local address")?;

    let runtime = PilotRuntime::from_config(&config);
    let upload_enabled = runtime.media.is_some();
    let state = AppState {
        router: runtime.router,
        posts: runtime.posts,
        scheduler: Arc::clone(&runtime.scheduler),
        media: runtime.media,
        sessions: Arc::new(SessionStore::new(config.gateway.session_ttl_secs)),
    };

    print_gateway_banner(&local_addr.to_string(), upload_enabled);
    tracing::info!(addr = %local_addr, "gateway listening");

    let upload_limit = upload_body_limit(config.media.max_file_size_mb);
    let app = build_app(state, &config.gateway.cors_origins, upload_limit);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP gateway")?;

    let pending = runtime.scheduler.pending_count();
    if pending > 0 {
        tracing::warn!(pending, "shutting down with scheduled posts pending; they are dropped");
    }
    runtime.scheduler.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn upload_body_limit(max_file_size_mb: u64) -> usize {
    usize::try_from(max_file_size_mb.saturating_mul(1_024 * 1_024))
        .unwrap_or(usize::MAX)
        .saturating_add(UPLOAD_OVERHEAD_BYTES)
}

fn print_gateway_banner(display_addr: &str, upload_enabled: bool) {
    println!("Gateway listening on {display_addr}");
    println!("  POST /chat");
    if upload_enabled {
        println!("  POST /chat/upload");
    } else {
        println!("  POST /chat/upload  (disabled: media hosting not configured)");
    }
    println!("  POST /chat/facebook/page-data");
    println!("  GET  /chat/facebook/check-session");
    println!("  GET  /health");
}

pub fn build_app(state: AppState, cors_origins: &[String], upload_limit: usize) -> Router {
    // No gateway timeout on turn routes; each provider call has its own.
    let turn_routes = Router::new()
        .route("/chat", post(handle_chat))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE));

    let upload_routes = Router::new()
        .route("/chat/upload", post(handle_upload))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(upload_limit));

    let session_routes = Router::new()
        .route("/health", get(handle_health))
        .route("/chat/facebook/page-data", post(handle_page_data))
        .route("/chat/facebook/check-session", get(handle_check_session))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ));

    let mut app = turn_routes
        .merge(upload_routes)
        .merge(session_routes)
        .with_state(state);

    if !cors_origins.is_empty() {
        let origins: Vec<_> = cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .allow_credentials(true),
        );
    }

    app
}
