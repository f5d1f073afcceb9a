use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ap_core::{Article, ArticleStorage, Error, Result};
use ap_inference::ArticleGenerator;
use tracing::{error, info};

use crate::inventory::InventoryMaintainer;
use crate::orchestrator::GenerationOrchestrator;
use crate::scheduler::{ArticleScheduler, Cadence, SchedulerHandle};
use crate::JobConfig;

/// Entry points the host process calls into.
pub struct ArticleJob {
    orchestrator: Arc<GenerationOrchestrator>,
    inventory: InventoryMaintainer,
    cadence: Cadence,
    started: AtomicBool,
}

impl ArticleJob {
    pub fn new(
        generator: Arc<dyn ArticleGenerator>,
        storage: Arc<dyn ArticleStorage>,
        config: JobConfig,
    ) -> Self {
        let orchestrator = Arc::new(
            GenerationOrchestrator::new(generator, storage).with_max_attempts(config.max_attempts),
        );
        Self::from_orchestrator(orchestrator, config)
    }

    pub fn from_orchestrator(orchestrator: Arc<GenerationOrchestrator>, config: JobConfig) -> Self {
        Self {
            inventory: InventoryMaintainer::new(orchestrator.clone(), config.min_articles, config.pacing),
            orchestrator,
            cadence: config.cadence,
            started: AtomicBool::new(false),
        }
    }

    pub fn orchestrator(&self) -> &Arc<GenerationOrchestrator> {
        &self.orchestrator
    }

    /// Fill the inventory, then install the recurring schedule. A failed fill
    /// is logged and the schedule is installed anyway. Only the first call
    /// succeeds.
    pub async fn initialize_on_startup(&self) -> Result<SchedulerHandle> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyInitialized);
        }

        match self.inventory.ensure_minimum().await {
            Ok(0) => info!(target: "scheduler", "Article inventory already satisfied"),
            Ok(generated) => info!(target: "scheduler", generated, "Article inventory filled"),
            Err(e) => error!(target: "scheduler", error = %e, "Error ensuring minimum articles"),
        }

        Ok(ArticleScheduler::start(self.orchestrator.clone(), self.cadence.clone()))
    }

    /// One generation for a manual trigger. Authorization and rate limiting
    /// are the caller's job.
    pub async fn generate_on_demand(&self) -> Result<Article> {
        info!(target: "scheduler", "On-demand article generation requested");
        self.orchestrator.run_once().await
    }
}
