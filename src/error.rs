use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `PagePilot`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum PilotError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Publishing ──────────────────────────────────────────────────────
    #[error("publish: {0}")]
    Publish(#[from] PublishError),

    // ── Media hosting ───────────────────────────────────────────────────
    #[error("media: {0}")]
    Media(#[from] MediaError),

    // ── Scheduling ──────────────────────────────────────────────────────
    #[error("schedule: {0}")]
    Schedule(#[from] ScheduleError),

    // ── Turn validation ─────────────────────────────────────────────────
    #[error("turn: {0}")]
    Turn(#[from] TurnError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("provider {provider} authentication failed")]
    Auth { provider: String },

    #[error("provider {provider} returned an empty response")]
    EmptyResponse { provider: String },
}

// ─── Publishing errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("publishing backend request failed: {0}")]
    Transport(String),

    #[error("publishing backend returned malformed payload: {0}")]
    Malformed(String),
}

// ─── Media errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media hosting is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("unsupported upload type: {0}")]
    Unsupported(String),

    #[error("file size {size} exceeds maximum {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("upload failed: {0}")]
    Upload(String),
}

// ─── Scheduling errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("'{input}' does not match the YYYY-MM-DD HH:mm pattern")]
    InvalidTimestamp { input: String },

    #[error("'{input}' does not exist in the local timezone")]
    NonexistentLocalTime { input: String },
}

// ─── Turn validation errors ─────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("No valid user message found")]
    NoUserMessage,
}

/// Convenience alias for functions returning [`PilotError`].
pub type PilotResult<T> = std::result::Result<T, PilotError>;
