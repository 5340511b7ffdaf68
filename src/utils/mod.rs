pub mod http_client;
pub mod scrub;
pub mod text;

pub use http_client::build_http_client;
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use text::log_preview;
