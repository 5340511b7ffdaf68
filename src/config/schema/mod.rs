mod core;
mod gateway;
mod llm;
mod media;
mod observability;
mod publishing;
mod scheduler;

pub use core::Config;
pub use gateway::GatewayConfig;
pub use llm::LlmConfig;
pub use media::MediaConfig;
pub use observability::ObservabilityConfig;
pub use publishing::PublishingConfig;
pub use scheduler::{ContentPolicyMode, SchedulerConfig};
