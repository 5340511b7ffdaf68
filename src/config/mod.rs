pub mod schema;

pub use schema::{
    Config, ContentPolicyMode, GatewayConfig, LlmConfig, MediaConfig, ObservabilityConfig,
    PublishingConfig, SchedulerConfig,
};
