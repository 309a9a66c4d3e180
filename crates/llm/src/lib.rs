//! LLM access for grounded answers: provider backends and prompt assembly.

pub mod answer;
pub mod provider;
pub mod providers;

pub use answer::{AnswerGenerator, UNKNOWN_ANSWER};
pub use provider::{CompletionOptions, LlmError, LlmProvider, Message, Role};
pub use providers::create_provider;
