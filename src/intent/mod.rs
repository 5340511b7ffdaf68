//! Per-turn intent detection and routing.

pub mod classifier;
pub mod prompts;
pub mod router;
pub mod schedule_time;
pub mod verdict;

pub use classifier::{ClassifierFallback, ClassifierGateway};
pub use router::{IntentRouter, TurnOutcome};
pub use schedule_time::{SCHEDULE_FORMAT, parse_schedule_time};
pub use verdict::IntentVerdict;
