use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::provider::{check_status, text_at, CompletionOptions, LlmError, LlmProvider, Message};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Chat completions against any OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String, base_url: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        }
    }

    fn request_body(&self, messages: &[Message], options: CompletionOptions) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": messages,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, messages: &[Message], options: CompletionOptions) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!("OpenAI chat via {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages, options))
            .send()
            .await?;
        let resp: serde_json::Value = check_status(response).await?.json().await?;
        text_at(&resp, "/choices/0/message/content")
    }
}
