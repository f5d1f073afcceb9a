use std::sync::Arc;
use std::time::Duration;

use ap_core::{Error, Result};
use tracing::info;

use crate::orchestrator::GenerationOrchestrator;

/// Startup fill bringing the store up to a minimum article count.
pub struct InventoryMaintainer {
    orchestrator: Arc<GenerationOrchestrator>,
    min_articles: usize,
    pacing: Duration,
}

impl InventoryMaintainer {
    pub fn new(orchestrator: Arc<GenerationOrchestrator>, min_articles: usize, pacing: Duration) -> Self {
        Self {
            orchestrator,
            min_articles,
            pacing,
        }
    }

    /// Generate articles one at a time until `min_articles` exist, pausing
    /// `pacing` between generations. Returns how many were generated.
    ///
    /// The first failed generation stops the fill and is returned; whatever
    /// was stored before it stays.
    pub async fn ensure_minimum(&self) -> Result<usize> {
        let count = self
            .orchestrator
            .storage()
            .count_articles()
            .await
            .map_err(|e| Error::Storage(format!("Failed to count articles: {}", e)))?;
        info!(target: "scheduler", count, "Current article count: {}", count);

        if count >= self.min_articles {
            return Ok(0);
        }

        let missing = self.min_articles - count;
        info!(target: "scheduler", "Generating {} initial articles...", missing);

        for i in 0..missing {
            self.orchestrator.run_once().await?;
            if i + 1 < missing {
                tokio::time::sleep(self.pacing).await;
            }
        }

        info!(target: "scheduler", "Initial articles generated successfully");
        Ok(missing)
    }
}
