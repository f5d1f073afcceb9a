use std::sync::Arc;

use ap_core::{Error, GenerationBackend, Result};
use crate::Config;

pub mod chat;
pub mod deepseek;
pub mod dummy;
pub mod huggingface;

pub use deepseek::DeepSeekModel;
pub use dummy::DummyModel;
pub use huggingface::HuggingFaceModel;

/// Build the backend named by `config.model`.
pub fn create_backend(config: &Config) -> Result<Arc<dyn GenerationBackend>> {
    let backend: Arc<dyn GenerationBackend> = match config.model.trim().to_lowercase().as_str() {
        "huggingface" | "hf" => Arc::new(HuggingFaceModel::new(config)?),
        "deepseek" => Arc::new(DeepSeekModel::new(config)?),
        "dummy" | "offline" => Arc::new(DummyModel::new()),
        other => {
            return Err(Error::Config(format!(
                "Unknown model '{}'. Available models: huggingface (default), deepseek, dummy",
                other
            )))
        }
    };
    tracing::debug!(target: "ai", backend = backend.name(), "Generation backend created");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_backend_by_name() {
        let mut config = Config::default();
        assert_eq!(create_backend(&config).unwrap().name(), "HuggingFace");

        config.model = "DeepSeek".to_string();
        assert_eq!(create_backend(&config).unwrap().name(), "DeepSeek");

        config.model = "dummy".to_string();
        assert_eq!(create_backend(&config).unwrap().name(), "Dummy");

        config.model = "gpt-17".to_string();
        assert!(matches!(create_backend(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_model_url_is_rejected() {
        let config = Config {
            model_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(matches!(create_backend(&config), Err(Error::Config(_))));
    }
}
