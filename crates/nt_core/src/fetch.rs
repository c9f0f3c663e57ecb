use async_trait::async_trait;
use crate::Result;

/// Transport used to read raw markup for a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns the response body as text
    async fn fetch(&self, url: &str) -> Result<String>;
}
