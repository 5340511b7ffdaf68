//! Axum-based HTTP gateway exposing the chat assistant to a browser client.
//!
//! - Request body limits (64KB for JSON, configured file size for uploads)
//! - Request timeouts (30s) on the session and health routes; chat turns are
//!   bounded by the provider's own per-call timeout
//! - Optional CORS for a separately hosted front-end

mod handlers;
mod server;
pub mod session;

pub use server::{build_app, run_gateway, run_gateway_with_listener};

use crate::intent::IntentRouter;
use crate::llm::{ChatRole, ChatTurn};
use crate::media::BinaryStore;
use crate::publishing::PostService;
use crate::scheduler::DeferredScheduler;
use serde::Deserialize;
use session::SessionStore;
use std::sync::Arc;

/// Maximum JSON request body size (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;
/// Timeout for routes that never call a backend (30s)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Multipart framing allowance on top of the configured file size.
pub const UPLOAD_OVERHEAD_BYTES: usize = 16_384;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<IntentRouter>,
    pub posts: Arc<PostService>,
    pub scheduler: Arc<DeferredScheduler>,
    pub media: Option<Arc<dyn BinaryStore>>,
    pub sessions: Arc<SessionStore>,
}

/// `POST /chat` body, in the Gemini-style shape browsers already send.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<WireMessage>,
}

/// Roles a browser may send. Anything unrecognised is dropped from the turn
/// list instead of failing the whole body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireRole {
    User,
    #[serde(alias = "assistant")]
    Model,
    #[serde(other)]
    Other,
}

impl WireRole {
    fn chat_role(self) -> Option<ChatRole> {
        match self {
            Self::User => Some(ChatRole::User),
            Self::Model => Some(ChatRole::Assistant),
            Self::Other => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WireMessage {
    pub role: WireRole,
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Deserialize)]
pub struct WirePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl ChatRequest {
    pub fn into_turns(self) -> Vec<ChatTurn> {
        self.messages
            .into_iter()
            .filter_map(|message| {
                Some(ChatTurn {
                    role: message.role.chat_role()?,
                    text: message
                        .parts
                        .into_iter()
                        .filter_map(|part| part.text)
                        .collect::<Vec<_>>()
                        .join("\n"),
                })
            })
            .collect()
    }
}

/// `POST /chat/facebook/page-data` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDataRequest {
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub page_access_token: Option<String>,
}
