//! Grounded answer synthesis over retrieved chunks.

use ragbasic_core::config::{LlmConfig, OllamaConfig};
use tracing::{debug, info};

use crate::provider::{CompletionOptions, LlmError, LlmProvider, Message};
use crate::providers::create_provider;

/// Reply the model is told to give when the context has no answer.
pub const UNKNOWN_ANSWER: &str = "I don't know";

const SYSTEM_PROMPT: &str = "You answer questions using only the information in the provided context. \
If the answer is not in the context, reply exactly: I don't know";

/// Join retrieved chunk texts into one context block, one chunk per line.
pub fn build_context<S: AsRef<str>>(texts: &[S]) -> String {
    texts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the chat messages for a question over `context`.
pub fn build_prompt(question: &str, context: &str) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(format!("Context:\n{context}\n\nQuestion: {question}")),
    ]
}

/// Answers questions from retrieved context through an [`LlmProvider`].
pub struct AnswerGenerator {
    provider: Box<dyn LlmProvider>,
    options: CompletionOptions,
}

impl AnswerGenerator {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            provider,
            options: CompletionOptions { temperature, max_tokens },
        }
    }

    /// Build the generator for the configured LLM provider.
    pub fn from_config(llm: &LlmConfig, ollama: &OllamaConfig) -> Result<Self, LlmError> {
        let provider = create_provider(llm, ollama)?;
        Ok(Self::new(provider, llm.temperature, llm.max_tokens))
    }

    /// Answer `question` from the given chunk texts.
    ///
    /// With no context the model is not called at all.
    pub async fn answer<S: AsRef<str>>(&self, question: &str, chunks: &[S]) -> Result<String, LlmError> {
        if chunks.is_empty() {
            info!("no context retrieved, skipping completion");
            return Ok(UNKNOWN_ANSWER.to_string());
        }

        let context = build_context(chunks);
        debug!(chunks = chunks.len(), context_chars = context.len(), "building answer prompt");

        let answer = self
            .provider
            .complete(&build_prompt(question, &context), self.options)
            .await?;
        Ok(answer.trim().to_string())
    }
}
