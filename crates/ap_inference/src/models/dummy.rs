use async_trait::async_trait;
use std::fmt;

use ap_core::{GenerationBackend, Result};

/// Offline backend. Answers every prompt with a short, well-formed article
/// about the quoted topic.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

fn quoted_topic(prompt: &str) -> &str {
    prompt
        .split('"')
        .nth(1)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or("current events")
}

#[async_trait]
impl GenerationBackend for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let topic = quoted_topic(prompt);
        Ok(format!(
            "TITLE: Field Notes on {topic}\n\
             SUMMARY: A brief offline overview of {topic}.\n\
             CONTENT:\n\
             This article was produced without a remote model. It sketches where {topic} stands today.\n\n\
             Practitioners continue to refine how {topic} is applied, measured and explained."
        ))
    }
}
