use async_trait::async_trait;
use crate::Result;

/// A language model that turns a rendered prompt into a completion.
#[async_trait]
pub trait InferenceModel: Send + Sync {
    /// Short name used in logs and the health endpoint
    fn name(&self) -> &str;

    /// Run one completion for `prompt`
    async fn complete(&self, prompt: &str) -> Result<String>;
}
