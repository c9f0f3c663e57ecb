use async_trait::async_trait;
use nt_core::{Error, InferenceModel, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::InferenceConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiModel {
    client: Client,
    api_key: String,
    base_url: String,
    model_name: String,
    temperature: f32,
}

impl OpenAiModel {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Inference("OpenAI API key is required".to_string()))?;

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config
                .base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model_name: config.model_name.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
        })
    }

    fn parse_response(response: ChatResponse) -> Result<String> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Inference("completion had no content".to_string()))
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl InferenceModel for OpenAiModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model_name,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        Self::parse_response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_requires_api_key() {
        let config = InferenceConfig::default();
        let err = OpenAiModel::new(&config).unwrap_err();
        assert_eq!(err.to_string(), "Inference error: OpenAI API key is required");

        let config = InferenceConfig {
            api_key: Some("test-key".to_string()),
            base_url: Some("https://api.example.com/v1/".to_string()),
            ..Default::default()
        };
        let model = OpenAiModel::new(&config).unwrap();
        assert_eq!(model.base_url, "https://api.example.com/v1");
        assert_eq!(model.name(), "gpt-4o");
        assert!(!format!("{:?}", model).contains("test-key"));
    }

    #[test]
    fn test_parse_response() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "요약입니다"}}]}"#,
        )
        .unwrap();
        assert_eq!(OpenAiModel::parse_response(response).unwrap(), "요약입니다");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(OpenAiModel::parse_response(empty).is_err());

        let refusal: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#).unwrap();
        assert!(OpenAiModel::parse_response(refusal).is_err());
    }
}
