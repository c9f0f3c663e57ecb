use std::sync::Arc;
use nt_core::{InferenceModel, Result};
use tracing::info;

use crate::{InferenceConfig, ModelKind};

pub mod dummy;
pub mod openai;
#[cfg(feature = "ollama")]
pub mod ollama;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;
#[cfg(feature = "ollama")]
pub use ollama::OllamaModel;

pub fn create_model(config: &InferenceConfig) -> Result<Arc<dyn InferenceModel>> {
    let model: Arc<dyn InferenceModel> = match config.kind {
        ModelKind::Openai => Arc::new(OpenAiModel::new(config)?),
        ModelKind::Dummy => Arc::new(DummyModel::new()),
        #[cfg(feature = "ollama")]
        ModelKind::Ollama => Arc::new(OllamaModel::new(config)?),
        #[cfg(not(feature = "ollama"))]
        ModelKind::Ollama => {
            return Err(nt_core::Error::Inference("built without the `ollama` feature".to_string()))
        }
    };
    info!(model = model.name(), "🧠 Inference model ready");
    Ok(model)
}
