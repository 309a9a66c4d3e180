use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be greater than zero")]
    NotPositive { key: &'static str },

    #[error("{key} is required when {provider_key}={provider}")]
    MissingForProvider {
        key: &'static str,
        provider_key: &'static str,
        provider: String,
    },

    #[error("unknown {key}: '{value}'")]
    UnknownProvider { key: &'static str, value: String },
}
