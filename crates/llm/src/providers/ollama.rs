use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::provider::{check_status, text_at, CompletionOptions, LlmError, LlmProvider, Message};

/// Chat completions against a local Ollama server (`/api/chat`).
pub struct OllamaProvider {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
            model,
        }
    }

    fn request_body(&self, messages: &[Message], options: CompletionOptions) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
            "options": {
                "temperature": options.temperature,
                "num_predict": options.max_tokens,
            },
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(&self, messages: &[Message], options: CompletionOptions) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.url);
        debug!("Ollama chat via {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .json(&self.request_body(messages, options))
            .send()
            .await?;
        let resp: serde_json::Value = check_status(response).await?.json().await?;
        text_at(&resp, "/message/content")
    }
}
