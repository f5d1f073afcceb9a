use async_trait::async_trait;
use std::fmt;

use ap_core::{GenerationBackend, Result};
use super::chat::ChatClient;
use crate::Config;

pub const DEEPSEEK_URL: &str = "https://api.deepseek.com/v1";
pub const DEEPSEEK_MODEL: &str = "deepseek-chat";

pub struct DeepSeekModel {
    chat: ChatClient,
}

impl fmt::Debug for DeepSeekModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekModel")
            .field("chat", &self.chat)
            .finish()
    }
}

impl DeepSeekModel {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            chat: ChatClient::new("DeepSeek", DEEPSEEK_URL, DEEPSEEK_MODEL, config)?,
        })
    }
}

#[async_trait]
impl GenerationBackend for DeepSeekModel {
    fn name(&self) -> &str {
        "DeepSeek"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.chat.complete(prompt).await.map_err(|e| {
            tracing::error!(target: "ai", error = %e, "DeepSeek API error");
            e
        })
    }
}
