use async_trait::async_trait;
use ap_core::{Article, ArticleStorage, ArticleUpdate, CandidateArticle, Result, SearchParams};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::StorageBackend;

/// Process-local store. Contents are lost on exit.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn kind() -> &'static str {
        "memory"
    }

    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn connect(_url: Option<&str>) -> Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl ArticleStorage for MemoryStorage {
    async fn list_articles(&self, params: &SearchParams) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        let mut found: Vec<Article> = articles.iter().filter(|a| a.matches(params)).cloned().collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn list_titles(&self) -> Result<Vec<String>> {
        Ok(self.articles.read().await.iter().map(|a| a.title.clone()).collect())
    }

    async fn count_articles(&self) -> Result<usize> {
        Ok(self.articles.read().await.len())
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        Ok(self.articles.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn create_article(&self, candidate: &CandidateArticle) -> Result<Article> {
        let article = Article::from_candidate(candidate);
        self.articles.write().await.push(article.clone());
        Ok(article)
    }

    async fn update_article(&self, id: &str, update: &ArticleUpdate) -> Result<Option<Article>> {
        let mut articles = self.articles.write().await;
        Ok(articles.iter_mut().find(|a| a.id == id).map(|article| {
            article.apply(update);
            article.clone()
        }))
    }

    async fn delete_article(&self, id: &str) -> Result<bool> {
        let mut articles = self.articles.write().await;
        let before = articles.len();
        articles.retain(|a| a.id != id);
        Ok(articles.len() != before)
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let articles = self.articles.read().await;
        let set: BTreeSet<String> = articles.iter().map(|a| a.category.to_string()).collect();
        Ok(set.into_iter().collect())
    }

    async fn tags(&self) -> Result<Vec<String>> {
        let articles = self.articles.read().await;
        let set: BTreeSet<String> = articles.iter().flat_map(|a| a.tags.iter().cloned()).collect();
        Ok(set.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ap_core::Category;

    pub(crate) fn candidate(title: &str, category: Category, tags: &[&str]) -> CandidateArticle {
        CandidateArticle {
            title: title.to_string(),
            summary: format!("About {}.", title),
            content: format!("{} explained in plain words.", title),
            category,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reading_time: 1,
            generator_name: "Dummy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();
        let first = storage
            .create_article(&candidate("Cloud Costs", Category::Technology, &["Cloud", "Data", "DevOps"]))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = storage
            .create_article(&candidate("Gene Editing", Category::Science, &["Biology", "Research", "Discovery"]))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(storage.count_articles().await.unwrap(), 2);
        assert_eq!(storage.list_titles().await.unwrap().len(), 2);

        let all = storage.list_articles(&SearchParams::default()).await.unwrap();
        assert_eq!(all[0].id, second.id, "newest first");

        let by_tag = storage
            .list_articles(&SearchParams { tag: Some("Cloud".to_string()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].title, "Cloud Costs");

        assert_eq!(storage.categories().await.unwrap(), vec!["Science", "Technology"]);
        assert_eq!(storage.tags().await.unwrap().len(), 6);

        let updated = storage
            .update_article(&first.id, &ArticleUpdate { title: Some("Cloud Bills".to_string()), ..Default::default() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Cloud Bills");
        assert_eq!(updated.created_at, first.created_at);
        assert!(storage.update_article("missing", &ArticleUpdate::default()).await.unwrap().is_none());

        assert!(storage.delete_article(&first.id).await.unwrap());
        assert!(!storage.delete_article(&first.id).await.unwrap());
        assert!(storage.get_article(&first.id).await.unwrap().is_none());

        let health = storage.health().await;
        assert!(health.database);
        assert_eq!(health.article_count, 1);
    }
}
