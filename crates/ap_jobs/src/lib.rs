//! The article-generation job: keeps a minimum inventory of unique generated
//! articles and adds one on a fixed cadence.

use std::time::Duration;

pub mod guard;
pub mod inventory;
pub mod job;
pub mod orchestrator;
pub mod scheduler;

pub use guard::{is_duplicate, DuplicateGuard, TitleGuard};
pub use inventory::InventoryMaintainer;
pub use job::ArticleJob;
pub use orchestrator::GenerationOrchestrator;
pub use scheduler::{ArticleScheduler, Cadence, SchedulerHandle};

pub const DEFAULT_MIN_ARTICLES: usize = 3;
pub const DEFAULT_PACING: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Inventory the startup fill brings the store up to.
    pub min_articles: usize,
    /// Delay between consecutive startup generations.
    pub pacing: Duration,
    /// Generation attempts per run before giving up on a unique title.
    pub max_attempts: usize,
    pub cadence: Cadence,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            min_articles: DEFAULT_MIN_ARTICLES,
            pacing: DEFAULT_PACING,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            cadence: Cadence::daily_at_midnight(None),
        }
    }
}

pub mod prelude {
    pub use super::{ArticleJob, Cadence, JobConfig, SchedulerHandle};
    pub use ap_core::{Article, Error, Result};
}
