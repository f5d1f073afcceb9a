use std::fmt;
use std::time::Duration;

pub mod generator;
pub mod models;

pub const DEFAULT_MODEL: &str = "huggingface";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct Config {
    /// Bearer credential for the remote backend.
    pub api_key: Option<String>,
    /// Backend kind: `huggingface`, `deepseek` or `dummy`.
    pub model: String,
    /// Remote model identifier, overriding the backend's default.
    pub model_name: Option<String>,
    /// Base URL of the OpenAI-compatible API, overriding the backend's default.
    pub model_url: Option<String>,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("model_name", &self.model_name)
            .field("model_url", &self.model_url)
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            model_name: None,
            model_url: None,
            timeout: DEFAULT_TIMEOUT,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

pub mod prelude {
    pub use super::generator::{ArticleGenerator, ContentGenerator};
    pub use super::models::create_backend;
    pub use super::Config;
    pub use ap_core::{CandidateArticle, Category, Error, GenerationBackend, Result};
}

pub use generator::{ArticleGenerator, ContentGenerator};
pub use models::create_backend;
