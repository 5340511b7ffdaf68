pub mod gemini;
pub mod traits;
pub mod types;

pub use gemini::GeminiProvider;
pub use traits::Provider;
pub use types::{ChatRole, ChatTurn, last_user_text};
