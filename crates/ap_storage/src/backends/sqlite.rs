use async_trait::async_trait;
use ap_core::{Article, ArticleStorage, ArticleUpdate, CandidateArticle, Error, Result, SearchParams};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::StorageBackend;

pub const DEFAULT_DB_PATH: &str = "articles.db";

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        summary TEXT NOT NULL,
        content TEXT NOT NULL,
        category TEXT NOT NULL,
        tags TEXT NOT NULL DEFAULT '[]',
        reading_time INTEGER NOT NULL,
        generator_name TEXT NOT NULL DEFAULT 'HuggingFace',
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_articles_created_at ON articles (created_at)",
];

pub struct SQLiteStorage {
    pool: SqlitePool,
    db_path: PathBuf,
}

fn db_error(action: &str) -> impl FnOnce(sqlx::Error) -> Error + '_ {
    move |e| Error::Database(format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl StorageBackend for SQLiteStorage {
    fn kind() -> &'static str {
        "sqlite"
    }

    fn get_error_message() -> &'static str {
        "SQLite database should be available at the configured path (default ./articles.db)"
    }

    async fn connect(url: Option<&str>) -> Result<Self> {
        let path = url
            .map(|u| u.trim_start_matches("sqlite://").trim_start_matches("sqlite:"))
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_DB_PATH);
        Self::new_with_path(Path::new(path)).await
    }
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))
            .map_err(db_error("parse database path"))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(db_error("connect to database"))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("Failed to run migration {}: {}", i, e)))?;
        }
        tracing::debug!(target: "storage", path = %db_path.display(), "SQLite migrations applied");

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }

    async fn write(&self, article: &Article) -> Result<()> {
        let tags = serde_json::to_string(&article.tags)?;
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO articles
            (id, title, summary, content, category, tags, reading_time, generator_name, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.id)
        .bind(&article.title)
        .bind(&article.summary)
        .bind(&article.content)
        .bind(article.category.as_str())
        .bind(tags)
        .bind(article.reading_time as i64)
        .bind(&article.generator_name)
        .bind(article.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&self.pool)
        .await
        .map_err(db_error("store article"))?;
        Ok(())
    }
}

fn row_to_article(row: &SqliteRow) -> Result<Article> {
    let tags: String = row.get("tags");
    let category: String = row.get("category");
    let created_at: String = row.get("created_at");
    Ok(Article {
        id: row.get("id"),
        title: row.get("title"),
        summary: row.get("summary"),
        content: row.get("content"),
        category: category.parse()?,
        tags: serde_json::from_str(&tags)?,
        reading_time: row.get::<i64, _>("reading_time").max(1) as u32,
        generator_name: row.get("generator_name"),
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| Error::Database(format!("Failed to parse date: {}", e)))?
            .with_timezone(&Utc),
    })
}

/// Substring pattern for `LIKE ... ESCAPE '\\'`, with `%` and `_` matched literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ArticleStorage for SQLiteStorage {
    async fn list_articles(&self, params: &SearchParams) -> Result<Vec<Article>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM articles WHERE 1 = 1");
        if let Some(term) = params.search_term() {
            let pattern = like_pattern(term);
            query
                .push(" AND (lower(title) LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR lower(summary) LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR lower(content) LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
        if let Some(category) = params.category_filter() {
            query
                .push(" AND lower(category) = ")
                .push_bind(category.to_lowercase());
        }
        if let Some(tag) = params.tag_filter() {
            query
                .push(" AND EXISTS (SELECT 1 FROM json_each(articles.tags) WHERE json_each.value = ")
                .push_bind(tag.to_string())
                .push(")");
        }
        query.push(" ORDER BY created_at DESC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list articles"))?;
        rows.iter().map(row_to_article).collect()
    }

    async fn list_titles(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT title FROM articles")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list titles"))?;
        Ok(rows.iter().map(|row| row.get("title")).collect())
    }

    async fn count_articles(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count articles"))?;
        Ok(count as usize)
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("get article"))?;
        row.as_ref().map(row_to_article).transpose()
    }

    async fn create_article(&self, candidate: &CandidateArticle) -> Result<Article> {
        let article = Article::from_candidate(candidate);
        self.write(&article).await?;
        Ok(article)
    }

    async fn update_article(&self, id: &str, update: &ArticleUpdate) -> Result<Option<Article>> {
        let Some(mut article) = self.get_article(id).await? else {
            return Ok(None);
        };
        article.apply(update);
        self.write(&article).await?;
        Ok(Some(article))
    }

    async fn delete_article(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete article"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT DISTINCT category FROM articles ORDER BY category")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list categories"))?;
        Ok(rows.iter().map(|row| row.get("category")).collect())
    }

    async fn tags(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT tags FROM articles")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list tags"))?;
        let mut tags = BTreeSet::new();
        for row in rows {
            let raw: String = row.get("tags");
            tags.extend(serde_json::from_str::<Vec<String>>(&raw)?);
        }
        Ok(tags.into_iter().collect())
    }
}
