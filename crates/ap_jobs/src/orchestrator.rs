use std::sync::Arc;

use ap_core::{Article, ArticleStorage, Error, Result};
use ap_inference::ArticleGenerator;
use tracing::{error, info, warn};

use crate::guard::{DuplicateGuard, TitleGuard};
use crate::DEFAULT_MAX_ATTEMPTS;

/// Drives one generation: candidate, duplicate check, persist.
///
/// Title reads are not locked against concurrent runs; two overlapping runs can
/// both accept the same title.
pub struct GenerationOrchestrator {
    generator: Arc<dyn ArticleGenerator>,
    storage: Arc<dyn ArticleStorage>,
    guard: Arc<dyn DuplicateGuard>,
    max_attempts: usize,
}

fn storage_failure(action: &str, e: Error) -> Error {
    Error::Storage(format!("Failed to {}: {}", action, e))
}

impl GenerationOrchestrator {
    pub fn new(generator: Arc<dyn ArticleGenerator>, storage: Arc<dyn ArticleStorage>) -> Self {
        Self {
            generator,
            storage,
            guard: Arc::new(TitleGuard),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_guard(mut self, guard: Arc<dyn DuplicateGuard>) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn storage(&self) -> &Arc<dyn ArticleStorage> {
        &self.storage
    }

    pub async fn run_once(&self) -> Result<Article> {
        info!(target: "scheduler", "Starting article generation...");

        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate().await;
            let existing = self
                .storage
                .list_titles()
                .await
                .map_err(|e| storage_failure("load existing titles", e))?;

            if self.guard.is_duplicate(&candidate.title, &existing) {
                warn!(
                    target: "scheduler",
                    attempt,
                    title = %candidate.title,
                    "Duplicate title found: \"{}\", regenerating...",
                    candidate.title
                );
                continue;
            }

            let article = self
                .storage
                .create_article(&candidate)
                .await
                .map_err(|e| storage_failure("store article", e))?;
            info!(
                target: "scheduler",
                id = %article.id,
                attempt,
                "Article generated: \"{}\" with tags: {}",
                article.title,
                article.tags.join(", ")
            );
            return Ok(article);
        }

        error!(
            target: "scheduler",
            "Failed to generate unique title after {} attempts",
            self.max_attempts
        );
        Err(Error::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}
