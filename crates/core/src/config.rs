use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_i64(profile: &str, key: &str, default: i64) -> i64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub chunking: ChunkingConfig,
    pub qdrant: QdrantConfig,
    pub embedding: EmbeddingConfig,
    pub ollama: OllamaConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `RAGBASIC_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("RAGBASIC_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            chunking: ChunkingConfig::from_env_profiled(p),
            qdrant: QdrantConfig::from_env_profiled(p),
            embedding: EmbeddingConfig::from_env_profiled(p),
            ollama: OllamaConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Reject settings that would only fail later, deep inside a request.
    ///
    /// Chunk parameters are not checked here: they are validated per request
    /// by the chunker, which owns their rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding.dimensions == 0 {
            return Err(ConfigError::NotPositive { key: "EMBEDDING_DIMENSIONS" });
        }
        if self.embedding.batch_size == 0 {
            return Err(ConfigError::NotPositive { key: "EMBEDDING_BATCH_SIZE" });
        }
        if self.llm.top_k == 0 {
            return Err(ConfigError::NotPositive { key: "RAG_TOP_K" });
        }
        self.embedding.check_provider(&self.llm)?;
        self.llm.check_provider()?;
        Ok(())
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:      {}:{}", self.server.host, self.server.port);
        tracing::info!("  chunking:    size={}, overlap={}", self.chunking.chunk_size, self.chunking.overlap);
        tracing::info!(
            "  qdrant:      url={}, collection={}, api_key={}",
            self.qdrant.url,
            self.qdrant.collection,
            if self.qdrant.api_key.is_some() { "set" } else { "(none)" }
        );
        tracing::info!(
            "  embedding:   provider={}, dimensions={}",
            self.embedding.provider, self.embedding.dimensions
        );
        tracing::info!("  ollama:      url={}", self.ollama.url);
        tracing::info!("  llm:         provider={}, top_k={}", self.llm.provider, self.llm.top_k);
    }

    /// Return a redacted view safe for API responses (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": { "host": self.server.host, "port": self.server.port },
            "chunking": { "chunk_size": self.chunking.chunk_size, "overlap": self.chunking.overlap },
            "qdrant": {
                "url": self.qdrant.url,
                "collection": self.qdrant.collection,
                "api_key_set": self.qdrant.api_key.is_some(),
            },
            "embedding": { "provider": self.embedding.provider, "dimensions": self.embedding.dimensions },
            "llm": { "provider": self.llm.provider, "configured": self.llm.is_configured() },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub max_upload_mb: u32,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 8080),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
            max_upload_mb: profiled_env_u32(p, "MAX_UPLOAD_MB", 50),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb as usize * 1024 * 1024
    }
}

// ── Chunking defaults ─────────────────────────────────────────

/// Defaults applied when a request does not name its own chunk parameters.
///
/// Kept signed so that a bad value in the environment surfaces as a chunker
/// validation error instead of silently wrapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum words per chunk.
    pub chunk_size: i64,
    /// Words of trailing context repeated at the start of the next chunk.
    pub overlap: i64,
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            chunk_size: profiled_env_i64(p, "CHUNK_SIZE", 300),
            overlap: profiled_env_i64(p, "CHUNK_OVERLAP", 50),
        }
    }
}

// ── Qdrant ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    pub url: String,
    pub collection: String,
    pub api_key: Option<String>,
}

impl QdrantConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_or(p, "QDRANT_URL", "http://localhost:6333"),
            collection: profiled_env_or(p, "QDRANT_COLLECTION", "documents"),
            api_key: profiled_env_opt(p, "QDRANT_API_KEY"),
        }
    }
}

// ── Embedding ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "ollama", "openai"
    pub provider: String,
    pub dimensions: u32,
    pub batch_size: u32,
}

impl EmbeddingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "EMBEDDING_PROVIDER", "ollama"),
            dimensions: profiled_env_u32(p, "EMBEDDING_DIMENSIONS", 768),
            batch_size: profiled_env_u32(p, "EMBEDDING_BATCH_SIZE", 64),
        }
    }

    fn check_provider(&self, llm: &LlmConfig) -> Result<(), ConfigError> {
        match self.provider.as_str() {
            "ollama" => Ok(()),
            "openai" if llm.openai_api_key.is_some() => Ok(()),
            "openai" => Err(ConfigError::MissingForProvider {
                key: "OPENAI_API_KEY",
                provider_key: "EMBEDDING_PROVIDER",
                provider: self.provider.clone(),
            }),
            other => Err(ConfigError::UnknownProvider {
                key: "EMBEDDING_PROVIDER",
                value: other.to_string(),
            }),
        }
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
    pub embedding_model: String,
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_or(p, "OLLAMA_URL", "http://localhost:11434"),
            model: profiled_env_or(p, "OLLAMA_MODEL", "mistral"),
            embedding_model: profiled_env_or(p, "OLLAMA_EMBEDDING_MODEL", "nomic-embed-text"),
        }
    }
}

// ── LLM (answer synthesis) ────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "ollama", "openai"
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub openai_embedding_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Chunks retrieved as context for a single answer.
    pub top_k: u32,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "ollama"),
            openai_api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            openai_model: profiled_env_or(p, "OPENAI_MODEL", "gpt-4o-mini"),
            openai_base_url: profiled_env_opt(p, "OPENAI_BASE_URL"),
            openai_embedding_model: profiled_env_or(p, "OPENAI_EMBEDDING_MODEL", "text-embedding-3-small"),
            temperature: profiled_env_or(p, "LLM_TEMPERATURE", "0.1")
                .parse()
                .unwrap_or(0.1),
            max_tokens: profiled_env_u32(p, "LLM_MAX_TOKENS", 1024),
            top_k: profiled_env_u32(p, "RAG_TOP_K", 10),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "openai" => self.openai_api_key.is_some(),
            "ollama" => true,
            _ => false,
        }
    }

    fn check_provider(&self) -> Result<(), ConfigError> {
        match self.provider.as_str() {
            "ollama" | "openai" if self.is_configured() => Ok(()),
            "openai" => Err(ConfigError::MissingForProvider {
                key: "OPENAI_API_KEY",
                provider_key: "LLM_PROVIDER",
                provider: self.provider.clone(),
            }),
            other => Err(ConfigError::UnknownProvider {
                key: "LLM_PROVIDER",
                value: other.to_string(),
            }),
        }
    }
}
