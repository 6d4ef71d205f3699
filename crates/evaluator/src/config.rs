use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

/// Tokens shorter than this are treated as placeholders.
const MIN_TOKEN_LEN: usize = 20;
const PLACEHOLDER_TOKEN: &str = "hf_xxx";

#[derive(Debug, Deserialize, Clone)]
pub struct EvaluatorConfig {
    /// Replace both upstream services with deterministic in-process fakes.
    #[serde(default)]
    pub mock: bool,
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,
    #[serde(default)]
    pub similarity: SimilarityConfig,
    #[serde(default)]
    pub review: ReviewConfig,
}

impl EvaluatorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize evaluator config")
    }

    /// Upper bound for a single remote call.
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            mock: false,
            call_timeout_secs: default_call_timeout_secs(),
            event_buffer_size: default_event_buffer_size(),
            similarity: SimilarityConfig::default(),
            review: ReviewConfig::default(),
        }
    }
}

/// Embedding-similarity endpoint (Hugging Face sentence-similarity pipeline).
#[derive(Debug, Deserialize, Clone)]
pub struct SimilarityConfig {
    #[serde(default = "default_similarity_endpoint")]
    pub endpoint: String,
    /// Environment variable holding the bearer token.
    #[serde(default = "default_similarity_token_env")]
    pub token_env: String,
    #[serde(default = "default_wait_for_model")]
    pub wait_for_model: bool,
}

impl SimilarityConfig {
    pub fn token(&self) -> Option<String> {
        read_secret(&self.token_env)
    }

    /// Whether the configured token looks like a real credential.
    pub fn has_usable_token(&self) -> bool {
        self.token().is_some_and(|token| is_usable_token(&token))
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            endpoint: default_similarity_endpoint(),
            token_env: default_similarity_token_env(),
            wait_for_model: default_wait_for_model(),
        }
    }
}

/// OpenAI-compatible chat-completions provider used for the code review.
#[derive(Debug, Deserialize, Clone)]
pub struct ReviewConfig {
    #[serde(default = "default_review_base_url")]
    pub base_url: String,
    #[serde(default = "default_review_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_review_api_key_env")]
    pub api_key_env: String,
}

impl ReviewConfig {
    pub fn api_key(&self) -> Option<String> {
        read_secret(&self.api_key_env)
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            base_url: default_review_base_url(),
            model: default_review_model(),
            api_key_env: default_review_api_key_env(),
        }
    }
}

fn read_secret(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn is_usable_token(token: &str) -> bool {
    !token.contains(PLACEHOLDER_TOKEN) && token.len() >= MIN_TOKEN_LEN
}

fn default_call_timeout_secs() -> u64 {
    20
}

fn default_event_buffer_size() -> usize {
    256
}

fn default_similarity_endpoint() -> String {
    "https://api-inference.huggingface.co/models/sentence-transformers/all-MiniLM-L6-v2"
        .to_string()
}

fn default_similarity_token_env() -> String {
    "HF_TOKEN".to_string()
}

fn default_wait_for_model() -> bool {
    true
}

fn default_review_base_url() -> String {
    "https://api.deepinfra.com/v1/openai".to_string()
}

fn default_review_model() -> String {
    "deepseek-ai/DeepSeek-Prover-V2-671B".to_string()
}

fn default_review_api_key_env() -> String {
    "DEEPINFRA_API_KEY".to_string()
}
