use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use ap_core::{Error, Result};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::orchestrator::GenerationOrchestrator;

pub const DAILY_AT_MIDNIGHT: &str = "0 0 * * *";

/// When scheduled generations fire.
#[derive(Clone)]
pub enum Cadence {
    /// Cron expression evaluated in `tz`, or server local time when `None`.
    Cron {
        expr: String,
        schedule: cron::Schedule,
        tz: Option<Tz>,
    },
    /// Fixed interval between firings.
    Every(Duration),
}

impl fmt::Debug for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Accept five-field expressions by adding a leading seconds field.
pub fn normalize_cron_expression(expr: &str) -> String {
    let expr = expr.trim();
    if expr.split_whitespace().count() == 5 {
        format!("0 {}", expr)
    } else {
        expr.to_string()
    }
}

impl Cadence {
    pub fn cron(expr: &str, tz: Option<&str>) -> Result<Self> {
        let normalized = normalize_cron_expression(expr);
        let schedule = cron::Schedule::from_str(&normalized)
            .map_err(|e| Error::Config(format!("Invalid cron expression '{}': {}", expr, e)))?;
        let tz = tz
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| Error::Config(format!("Invalid timezone: {}", name)))
            })
            .transpose()?;
        Ok(Cadence::Cron {
            expr: expr.trim().to_string(),
            schedule,
            tz,
        })
    }

    pub fn daily_at_midnight(tz: Option<Tz>) -> Self {
        let normalized = normalize_cron_expression(DAILY_AT_MIDNIGHT);
        match cron::Schedule::from_str(&normalized) {
            Ok(schedule) => Cadence::Cron {
                expr: DAILY_AT_MIDNIGHT.to_string(),
                schedule,
                tz,
            },
            // The constant expression always parses.
            Err(_) => Cadence::Every(Duration::from_secs(24 * 60 * 60)),
        }
    }

    pub fn every(interval: Duration) -> Self {
        Cadence::Every(interval.max(Duration::from_secs(1)))
    }

    /// Next firing strictly after `from`, or `None` when the schedule has ended.
    pub fn next_after(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Cadence::Every(interval) => chrono::Duration::from_std(*interval)
                .ok()
                .map(|step| from + step),
            Cadence::Cron { schedule, tz: Some(tz), .. } => schedule
                .after(&from.with_timezone(tz))
                .next()
                .map(|dt| dt.with_timezone(&Utc)),
            Cadence::Cron { schedule, tz: None, .. } => schedule
                .after(&from.with_timezone(&Local))
                .next()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Wait before the next firing, plus the scheduled instant for cron
    /// cadences. The instant is always after `last_fired`.
    fn next_wait(
        &self,
        now: DateTime<Utc>,
        last_fired: Option<DateTime<Utc>>,
    ) -> Option<(Duration, Option<DateTime<Utc>>)> {
        match self {
            Cadence::Every(interval) => Some((*interval, None)),
            Cadence::Cron { .. } => {
                let from = last_fired.map_or(now, |last| last.max(now));
                self.next_after(from).map(|next| {
                    let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
                    (wait, Some(next))
                })
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Cadence::Every(interval) => format!("every {}s", interval.as_secs()),
            Cadence::Cron { expr, tz: Some(tz), .. } => format!("cron '{}' ({})", expr, tz),
            Cadence::Cron { expr, tz: None, .. } => format!("cron '{}' (local time)", expr),
        }
    }
}

/// Handle to a running scheduler task.
pub struct SchedulerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop waiting for the next firing and wait for the task to exit. A
    /// generation already in progress finishes first.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!(target: "scheduler", error = %e, "Article scheduler task ended abnormally");
        }
    }
}

pub struct ArticleScheduler;

impl ArticleScheduler {
    pub fn start(orchestrator: Arc<GenerationOrchestrator>, cadence: Cadence) -> SchedulerHandle {
        let cancel = CancellationToken::new();
        info!(
            target: "scheduler",
            "Article scheduler started - will generate 1 article {}",
            cadence.describe()
        );
        let task = tokio::spawn(Self::run_loop(orchestrator, cadence, cancel.clone()));
        SchedulerHandle { cancel, task }
    }

    async fn run_loop(
        orchestrator: Arc<GenerationOrchestrator>,
        cadence: Cadence,
        cancel: CancellationToken,
    ) {
        let mut last_fired = None;
        loop {
            let Some((wait, slot)) = cadence.next_wait(Utc::now(), last_fired) else {
                info!(target: "scheduler", "Schedule has no further firings, stopping");
                break;
            };
            debug!(target: "scheduler", wait_secs = wait.as_secs(), "Waiting for next scheduled generation");

            tokio::select! {
                _ = cancel.cancelled() => {
                    info!(target: "scheduler", "Article scheduler stopped");
                    break;
                }
                _ = tokio::time::sleep(wait) => {
                    last_fired = slot;
                    info!(target: "scheduler", "Scheduled article generation triggered");
                    if let Err(e) = orchestrator.run_once().await {
                        error!(target: "scheduler", error = %e, "Scheduled article generation failed");
                    }
                }
            }
        }
    }
}
