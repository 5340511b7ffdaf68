//! Hosting for uploaded images. The publishing backend only ever sees a URL.

pub mod cloudinary;
pub mod detection;

pub use cloudinary::CloudinaryStore;

use async_trait::async_trait;

#[async_trait]
pub trait BinaryStore: Send + Sync {
    fn name(&self) -> &str;

    /// Store the bytes and return a publicly reachable URL.
    async fn store(&self, bytes: Vec<u8>, filename: Option<&str>) -> anyhow::Result<String>;
}
