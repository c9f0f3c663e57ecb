use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use langchain_rust::language_models::llm::LLM;
use langchain_rust::llm::ollama::client::{Ollama, OllamaClient};
use nt_core::{Error, InferenceModel, Result};
use url::Url;

use crate::InferenceConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "gemma3:12b";

/// Local model served by Ollama.
pub struct OllamaModel {
    client: Ollama,
    model_name: String,
}

impl fmt::Debug for OllamaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaModel")
            .field("client", &"<Ollama>")
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OllamaModel {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let raw = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;
        let host = format!("{}://{}", url.scheme(), url.host_str().unwrap_or("localhost"));
        let port = url.port().unwrap_or(11434);
        let model_name = config.model_name.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let client = Ollama::new(Arc::new(OllamaClient::new(host, port)), model_name.clone(), None);
        Ok(Self { client, model_name })
    }
}

#[async_trait]
impl InferenceModel for OllamaModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.client
            .invoke(prompt)
            .await
            .map_err(|e| Error::Inference(format!("Ollama completion failed: {}", e)))
    }
}
