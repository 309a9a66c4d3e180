pub mod ollama;
pub mod openai;

use ragbasic_core::config::{LlmConfig, OllamaConfig};

use crate::provider::{LlmError, LlmProvider};

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Build the chat backend named by `LLM_PROVIDER`.
pub fn create_provider(llm: &LlmConfig, ollama: &OllamaConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    match llm.provider.as_str() {
        "ollama" => Ok(Box::new(OllamaProvider::new(ollama.url.clone(), ollama.model.clone()))),
        "openai" => {
            let Some(api_key) = llm.openai_api_key.clone() else {
                return Err(LlmError::NotConfigured("OPENAI_API_KEY not set".into()));
            };
            Ok(Box::new(OpenAiProvider::new(
                api_key,
                llm.openai_model.clone(),
                llm.openai_base_url.as_deref(),
            )))
        }
        other => Err(LlmError::NotConfigured(format!("unknown LLM provider: '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragbasic_core::Config;

    fn config(provider: &str) -> Config {
        let mut config = Config::for_profile("LLMTEST_FACTORY");
        config.llm.provider = provider.to_string();
        config.llm.openai_api_key = None;
        config
    }

    #[test]
    fn ollama_needs_no_key() {
        let config = config("ollama");
        assert!(create_provider(&config.llm, &config.ollama).is_ok());
    }

    #[test]
    fn openai_without_key_fails() {
        let config = config("openai");
        assert!(matches!(
            create_provider(&config.llm, &config.ollama),
            Err(LlmError::NotConfigured(_))
        ));
    }

    #[test]
    fn unknown_provider_is_named_in_error() {
        let config = config("gemini");
        match create_provider(&config.llm, &config.ollama) {
            Err(LlmError::NotConfigured(msg)) => assert!(msg.contains("gemini")),
            _ => panic!("expected NotConfigured"),
        }
    }
}
