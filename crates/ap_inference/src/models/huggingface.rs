use async_trait::async_trait;
use std::fmt;

use ap_core::{GenerationBackend, Result};
use super::chat::ChatClient;
use crate::Config;

pub const HUGGINGFACE_URL: &str = "https://router.huggingface.co/v1";
pub const HUGGINGFACE_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";

/// Chat completions through the HuggingFace inference router.
pub struct HuggingFaceModel {
    chat: ChatClient,
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("chat", &self.chat)
            .finish()
    }
}

impl HuggingFaceModel {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            chat: ChatClient::new("HuggingFace", HUGGINGFACE_URL, HUGGINGFACE_MODEL, config)?,
        })
    }
}

#[async_trait]
impl GenerationBackend for HuggingFaceModel {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.chat.complete(prompt).await.map_err(|e| {
            tracing::error!(target: "ai", error = %e, "HuggingFace API error");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ap_core::Error;

    #[test]
    fn test_defaults() {
        let model = HuggingFaceModel::new(&Config::default()).unwrap();
        assert_eq!(
            model.chat.endpoint().as_str(),
            "https://router.huggingface.co/v1/chat/completions"
        );
        assert_eq!(model.chat.model(), HUGGINGFACE_MODEL);
    }

    #[tokio::test]
    async fn test_model_requires_api_key() {
        let model = HuggingFaceModel::new(&Config::default()).unwrap();
        let err = model.complete("prompt").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Generation backend unavailable: HuggingFace API key is required"
        );
        assert!(matches!(err, Error::BackendUnavailable(_)));
    }
}
