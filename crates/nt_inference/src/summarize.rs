use nt_core::{Error, InferenceModel, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::prompts::{article_prompt, trend_prompt};

/// Runs one completion under `timeout`. Every failure, including an empty
/// completion, comes back as `Error::Summarization`.
async fn invoke(model: &dyn InferenceModel, prompt: &str, timeout: Duration) -> Result<String> {
    let completion = tokio::time::timeout(timeout, model.complete(prompt))
        .await
        .map_err(|_| Error::Summarization(format!("{} timed out after {}s", model.name(), timeout.as_secs())))?
        .map_err(|e| match e {
            Error::Summarization(_) => e,
            other => Error::Summarization(other.to_string()),
        })?;

    let completion = completion.trim();
    if completion.is_empty() {
        return Err(Error::Summarization(format!("{} returned an empty completion", model.name())));
    }
    Ok(completion.to_string())
}

/// Summarizes a single article toward a purpose.
pub struct ArticleSummarizer {
    model: Arc<dyn InferenceModel>,
    timeout: Duration,
}

impl ArticleSummarizer {
    pub fn new(model: Arc<dyn InferenceModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    pub async fn summarize(&self, article_text: &str, purpose: &str) -> Result<String> {
        debug!(chars = article_text.chars().count(), %purpose, "Summarizing article");
        invoke(self.model.as_ref(), &article_prompt(purpose, article_text), self.timeout).await
    }
}

/// Folds the per-article summaries into one trend digest.
pub struct TrendAggregator {
    model: Arc<dyn InferenceModel>,
    timeout: Duration,
}

impl TrendAggregator {
    pub fn new(model: Arc<dyn InferenceModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    pub async fn aggregate(&self, summaries: &[String], purpose: &str) -> Result<String> {
        info!(count = summaries.len(), %purpose, "Aggregating trend digest");
        let joined = summaries.join("\n");
        invoke(self.model.as_ref(), &trend_prompt(purpose, &joined), self.timeout).await
    }
}
