use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Science,
    Innovation,
    Business,
    Health,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Technology,
        Category::Science,
        Category::Innovation,
        Category::Business,
        Category::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Science => "Science",
            Category::Innovation => "Innovation",
            Category::Business => "Business",
            Category::Health => "Health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Config(format!("Unknown category: {}", s)))
    }
}

/// An unpersisted generation result, pending duplicate check and storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateArticle {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub reading_time: u32,
    pub generator_name: String,
}

/// A persisted article record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub reading_time: u32,
    pub generator_name: String,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn from_candidate(candidate: &CandidateArticle) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: candidate.title.clone(),
            summary: candidate.summary.clone(),
            content: candidate.content.clone(),
            category: candidate.category,
            tags: candidate.tags.clone(),
            reading_time: candidate.reading_time,
            generator_name: candidate.generator_name.clone(),
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: &ArticleUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(summary) = &update.summary {
            self.summary = summary.clone();
        }
        if let Some(content) = &update.content {
            self.content = content.clone();
            if update.reading_time.is_none() {
                self.reading_time = reading_time(content);
            }
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(tags) = &update.tags {
            self.tags = tags.clone();
        }
        if let Some(minutes) = update.reading_time {
            self.reading_time = minutes.max(1);
        }
    }

    pub fn matches(&self, params: &SearchParams) -> bool {
        if let Some(term) = params.search_term() {
            let term = term.to_lowercase();
            let hit = self.title.to_lowercase().contains(&term)
                || self.summary.to_lowercase().contains(&term)
                || self.content.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if let Some(category) = params.category_filter() {
            if !self.category.as_str().eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(tag) = params.tag_filter() {
            if !self.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub reading_time: Option<u32>,
}

impl ArticleUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ArticleUpdate::default()
    }
}

/// Listing filters. `"all"` and blank values mean "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

impl SearchParams {
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn category_filter(&self) -> Option<&str> {
        active(&self.category)
    }

    pub fn tag_filter(&self) -> Option<&str> {
        active(&self.tag)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub database: bool,
    pub database_latency_ms: i64,
    pub article_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Minutes needed to read `content` at 200 words per minute, never less than one.
pub fn reading_time(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article::from_candidate(&CandidateArticle {
            title: "Edge Computing Explained".to_string(),
            summary: "A short tour of edge computing.".to_string(),
            content: "Edge nodes process data close to where it is produced.".to_string(),
            category: Category::Technology,
            tags: vec!["Cloud".to_string(), "Data".to_string(), "Infrastructure".to_string()],
            reading_time: 1,
            generator_name: "Dummy".to_string(),
        })
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("one two three"), 1);
        assert_eq!(reading_time(&"word ".repeat(200)), 1);
        assert_eq!(reading_time(&"word ".repeat(201)), 2);
        assert_eq!(reading_time(&"word\n\n".repeat(1000)), 5);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("science".parse::<Category>().unwrap(), Category::Science);
        assert_eq!(" Health ".parse::<Category>().unwrap(), Category::Health);
        assert!("Sports".parse::<Category>().is_err());
    }

    #[test]
    fn test_search_params_treat_all_as_unfiltered() {
        let article = sample();
        let params = SearchParams {
            search: Some("EDGE".to_string()),
            category: Some("all".to_string()),
            tag: Some("Cloud".to_string()),
        };
        assert!(article.matches(&params));

        let params = SearchParams {
            category: Some("Business".to_string()),
            ..Default::default()
        };
        assert!(!article.matches(&params));

        let params = SearchParams {
            tag: Some("cloud".to_string()),
            ..Default::default()
        };
        assert!(!article.matches(&params));
    }

    #[test]
    fn test_update_recomputes_reading_time() {
        let mut article = sample();
        article.apply(&ArticleUpdate {
            content: Some("word ".repeat(450)),
            ..Default::default()
        });
        assert_eq!(article.reading_time, 3);

        article.apply(&ArticleUpdate {
            title: Some("Renamed".to_string()),
            reading_time: Some(0),
            ..Default::default()
        });
        assert_eq!(article.title, "Renamed");
        assert_eq!(article.reading_time, 1);
        assert!(ArticleUpdate::default().is_empty());
    }
}
