use std::fmt;
use nt_core::{InferenceModel, Result};

const SUMMARY_WORDS: usize = 20;

/// Offline model: answers with the first words of the prompt's last non-empty line.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let line = prompt
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or_default();
        Ok(line.split_whitespace().take(SUMMARY_WORDS).collect::<Vec<_>>().join(" "))
    }
}
