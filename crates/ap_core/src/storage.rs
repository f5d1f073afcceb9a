use async_trait::async_trait;
use chrono::Utc;
use std::time::Instant;

use crate::types::{Article, ArticleUpdate, CandidateArticle, HealthStatus, SearchParams};
use crate::Result;

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Articles matching `params`, newest first.
    async fn list_articles(&self, params: &SearchParams) -> Result<Vec<Article>>;

    /// Titles of every stored article.
    async fn list_titles(&self) -> Result<Vec<String>> {
        Ok(self
            .list_articles(&SearchParams::default())
            .await?
            .into_iter()
            .map(|a| a.title)
            .collect())
    }

    async fn count_articles(&self) -> Result<usize>;

    async fn get_article(&self, id: &str) -> Result<Option<Article>>;

    /// Persist a candidate, assigning its identifier and creation timestamp.
    async fn create_article(&self, candidate: &CandidateArticle) -> Result<Article>;

    async fn update_article(&self, id: &str, update: &ArticleUpdate) -> Result<Option<Article>>;

    async fn delete_article(&self, id: &str) -> Result<bool>;

    /// Distinct categories in use, sorted.
    async fn categories(&self) -> Result<Vec<String>>;

    /// Distinct tags in use, sorted.
    async fn tags(&self) -> Result<Vec<String>>;

    /// Probe the backend. Failures are reported as a degraded status.
    async fn health(&self) -> HealthStatus {
        let start = Instant::now();
        match self.count_articles().await {
            Ok(article_count) => HealthStatus {
                database: true,
                database_latency_ms: start.elapsed().as_millis() as i64,
                article_count,
                timestamp: Utc::now(),
            },
            Err(e) => {
                tracing::warn!(target: "storage", error = %e, "Health probe failed");
                HealthStatus {
                    database: false,
                    database_latency_ms: -1,
                    article_count: 0,
                    timestamp: Utc::now(),
                }
            }
        }
    }
}
