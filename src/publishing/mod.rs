//! Publishing backend seam plus the services built on it.

pub mod content;
pub mod credential;
pub mod facebook;
pub mod history;
pub mod service;
pub mod traits;

pub use content::{ContentGenerator, unique_post_prompt};
pub use credential::PublishCredential;
pub use facebook::FacebookPublisher;
pub use history::UniquenessOracle;
pub use service::{PostService, PublishFailure, PublishOutcome};
pub use traits::{PostRecord, PublishResponse, Publisher};
