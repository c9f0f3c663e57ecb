use std::time::Duration;

pub mod models;
pub mod prompts;
pub mod summarize;

pub use models::create_model;
pub use summarize::{ArticleSummarizer, TrendAggregator};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ModelKind {
    /// OpenAI-compatible chat completions API
    #[default]
    Openai,
    /// Deterministic offline model
    Dummy,
    /// Local Ollama server, needs the `ollama` feature
    Ollama,
}

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub kind: ModelKind,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            kind: ModelKind::default(),
            model_name: None,
            base_url: None,
            api_key: None,
            temperature: 0.7,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub mod prelude {
    pub use super::{create_model, ArticleSummarizer, InferenceConfig, ModelKind, TrendAggregator};
    pub use nt_core::{InferenceModel, Result, Error};
}
