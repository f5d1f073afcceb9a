use async_trait::async_trait;
use std::fmt;
use crate::Result;

/// A remote (or local) text generation service.
#[async_trait]
pub trait GenerationBackend: Send + Sync + fmt::Debug {
    /// Provenance name stored with every article this backend is configured for.
    fn name(&self) -> &str;

    /// Send a single user instruction and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
