//! Chat-completion seam shared by every LLM backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat turn, serialized exactly as both Ollama and OpenAI expect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// Sampling settings for a single completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 1024,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} — {body}")]
    Api { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one non-streaming chat completion and return the reply text.
    async fn complete(&self, messages: &[Message], options: CompletionOptions) -> Result<String, LlmError>;
}

/// Turn a non-200 response into [`LlmError::Api`], keeping the body for logs.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(LlmError::Api {
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
    })
}

/// Pull a string out of a JSON response by pointer, e.g. `/message/content`.
pub(crate) fn text_at(resp: &serde_json::Value, pointer: &str) -> Result<String, LlmError> {
    resp.pointer(pointer)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| LlmError::Parse(format!("missing {pointer}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_serializes_lowercase_role() {
        let value = serde_json::to_value(Message::system("be brief")).unwrap();
        assert_eq!(value, json!({"role": "system", "content": "be brief"}));
    }

    #[test]
    fn text_at_reports_missing_pointer() {
        let resp = json!({"choices": []});
        match text_at(&resp, "/choices/0/message/content") {
            Err(LlmError::Parse(msg)) => assert!(msg.contains("/choices/0")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
